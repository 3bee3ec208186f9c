//! The provider surface consumed by front-ends.
//!
//! A [`NodeProvider`] knows the available node types and owns the rules for
//! wiring their nodes together.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::node::{Arguments, Node, NodeId, Pin, PinRef};
use crate::node_type::NodeType;

/// Node types plus connection legality.
///
/// Only [`NodeProvider::node_types`] and [`NodeProvider::node_type`] are
/// required; the remaining operations have default implementations.
pub trait NodeProvider<V> {
    /// Returns every available node type, sorted by category then kind id.
    fn node_types(&self) -> Vec<&NodeType<V>>;

    /// Looks up a node type by kind id.
    fn node_type(&self, kind: &str) -> Result<&NodeType<V>>;

    /// Creates a node of the given kind.
    fn create(&self, kind: &str, node_id: NodeId, arguments: Arguments) -> Result<Node> {
        self.node_type(kind)?.create(node_id, arguments)
    }

    /// Loads a node of the given kind from its document.
    fn load_json(&self, kind: &str, document: Value) -> Result<Node> {
        self.node_type(kind)?.load_json(document)
    }

    /// Returns whether an edge may run from `source` to `destination`.
    ///
    /// The source must produce values, the destination must consume them,
    /// and both must carry the same type tag.
    fn is_compatible(&self, source: &Pin, destination: &Pin) -> bool {
        source.can_feed(destination)
    }

    /// Connects two pins, recording the edge on both ends.
    ///
    /// Nothing is mutated unless every precondition holds.
    fn connect(&self, graph: &mut Graph, source: &PinRef, destination: &PinRef) -> Result<()> {
        let compatible = self.is_compatible(graph.pin(source)?, graph.pin(destination)?);
        if !compatible {
            return Err(Error::incompatible_connection(source, destination));
        }
        graph.link(source, destination)
    }

    /// Removes one edge between two pins from both ends.
    fn disconnect(&self, graph: &mut Graph, source: &PinRef, destination: &PinRef) -> Result<()> {
        graph.unlink(source, destination)
    }
}
