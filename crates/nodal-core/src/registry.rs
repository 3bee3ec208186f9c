//! In-memory node type registry.

use std::collections::BTreeMap;
use std::fmt;

use crate::TRACING_TARGET_REGISTRY;
use crate::error::{Error, Result};
use crate::node::{Arguments, Node, NodeId};
use crate::node_type::NodeType;
use crate::provider::NodeProvider;

/// Node types keyed by kind id.
///
/// The registry is built explicitly at startup and handed to whatever needs
/// to create or connect nodes; there is no global kind table.
pub struct NodeRegistry<V> {
    types: BTreeMap<String, NodeType<V>>,
}

impl<V> NodeRegistry<V> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Registers a node type under its id.
    pub fn register(&mut self, node_type: NodeType<V>) -> Result<()> {
        if self.types.contains_key(node_type.id()) {
            return Err(Error::duplicate_node_type(node_type.id()));
        }

        tracing::debug!(
            target: TRACING_TARGET_REGISTRY,
            kind = node_type.id(),
            category = node_type.category(),
            "Node type registered"
        );

        self.types.insert(node_type.id().to_owned(), node_type);
        Ok(())
    }

    /// Registers a node type, returning the updated registry.
    pub fn with(mut self, node_type: NodeType<V>) -> Result<Self> {
        self.register(node_type)?;
        Ok(self)
    }

    /// Looks up a node type by kind id.
    pub fn get(&self, kind: &str) -> Result<&NodeType<V>> {
        self.types
            .get(kind)
            .ok_or_else(|| Error::unknown_node_type(kind))
    }

    /// Returns whether a kind id is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.types.contains_key(kind)
    }

    /// Creates a node of the given kind.
    pub fn create(
        &self,
        kind: &str,
        node_id: impl Into<NodeId>,
        arguments: Arguments,
    ) -> Result<Node> {
        self.get(kind)?.create(node_id, arguments)
    }

    /// Iterates over node types in kind id order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeType<V>> {
        self.types.values()
    }

    /// Returns the number of registered node types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns whether no node types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<V> Default for NodeRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for NodeRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<V> NodeProvider<V> for NodeRegistry<V> {
    fn node_types(&self) -> Vec<&NodeType<V>> {
        let mut types = self.types.values().collect::<Vec<_>>();
        types.sort_by(|a, b| (a.category(), a.id()).cmp(&(b.category(), b.id())));
        types
    }

    fn node_type(&self, kind: &str) -> Result<&NodeType<V>> {
        self.get(kind)
    }
}
