//! Graph documents: the JSON shape of nodes and whole graphs.
//!
//! A node document is
//!
//! ```json
//! { "node_id": "a1", "pins": { "a": ["v1|out"], "out": [] }, "operator_name": "add" }
//! ```
//!
//! The kind of a node is not part of its document. A [`GraphDocument`]
//! carries it alongside each node.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::TRACING_TARGET_GRAPH;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::node::{Node, NodeId, PinRef};
use crate::node_type::NodeType;
use crate::provider::NodeProvider;

/// Separator between node id and pin id in an encoded edge.
pub const EDGE_DELIMITER: char = '|';

/// Id given to a node between template construction and id assignment.
const TEMPLATE_NODE_ID: &str = "<template>";

impl Node {
    /// Serializes the node as `{node_id, pins, ...arguments}`.
    pub fn to_json(&self) -> Result<Value> {
        if self.id().as_str().contains(EDGE_DELIMITER) {
            return Err(Error::malformed_document(format!(
                "node id `{}` contains the edge delimiter `{EDGE_DELIMITER}`",
                self.id()
            )));
        }

        let mut pins = Map::new();
        for pin in self.pins() {
            if !pin.is_multi_connect() && pin.targets().len() > 1 {
                return Err(Error::inconsistent_edge(
                    &self.pin_ref(pin.pin_id()),
                    "single-connect pin holds more than one edge",
                ));
            }
            let edges = pin
                .targets()
                .iter()
                .map(|target| target.encode().map(Value::String))
                .collect::<Result<Vec<_>>>()?;
            pins.insert(pin.pin_id().to_owned(), Value::Array(edges));
        }

        let mut document = Map::new();
        document.insert("node_id".into(), Value::String(self.id().to_string()));
        document.insert("pins".into(), Value::Object(pins));
        for (key, value) in self.arguments() {
            document.insert(key.clone(), value.clone());
        }
        Ok(Value::Object(document))
    }
}

impl<V> NodeType<V> {
    /// Deserializes a node of this kind from its document.
    ///
    /// Every declared pin must have an entry in `pins`, and no key may be
    /// left over in either `pins` or the document itself.
    pub fn load_json(&self, document: Value) -> Result<Node> {
        let Value::Object(mut document) = document else {
            return Err(Error::malformed_document("node document must be an object"));
        };

        let node_id = match document.remove("node_id") {
            Some(Value::String(id)) if id.is_empty() || id.contains(EDGE_DELIMITER) => {
                return Err(Error::malformed_document(format!(
                    "node id `{id}` is empty or contains the edge delimiter `{EDGE_DELIMITER}`"
                )));
            }
            Some(Value::String(id)) => NodeId::new(id),
            Some(other) => {
                return Err(Error::malformed_document(format!(
                    "`node_id` must be a string, got {other}"
                )));
            }
            None => return Err(Error::malformed_document("missing `node_id`")),
        };
        let mut pins = match document.remove("pins") {
            Some(Value::Object(pins)) => pins,
            Some(other) => {
                return Err(Error::malformed_document(format!(
                    "`pins` of node {node_id} must be an object, got {other}"
                )));
            }
            None => {
                return Err(Error::malformed_document(format!(
                    "node {node_id} has no `pins`"
                )));
            }
        };

        let arguments = self
            .resolve_arguments(&mut document)
            .map_err(|error| error.with_node(node_id.clone()))?;
        if !document.is_empty() {
            return Err(Error::malformed_document(format!(
                "node {node_id} has unexpected keys: {}",
                join_keys(&document)
            ))
            .with_node(node_id));
        }

        let mut node = self.instantiate(NodeId::new(TEMPLATE_NODE_ID), arguments);
        node.set_id(node_id.clone());

        for pin in node.pins_mut() {
            let entry = pins.remove(pin.pin_id()).ok_or_else(|| {
                Error::malformed_document(format!(
                    "node {node_id} has no entry for pin `{}`",
                    pin.pin_id()
                ))
            })?;
            let targets = decode_edges(&node_id, pin.pin_id(), entry)?;
            if !pin.is_multi_connect() && targets.len() > 1 {
                return Err(Error::malformed_document(format!(
                    "pin {node_id}.{} is single-connect but lists {} edges",
                    pin.pin_id(),
                    targets.len()
                )));
            }
            pin.set_targets(targets);
        }

        if !pins.is_empty() {
            return Err(Error::malformed_document(format!(
                "node {node_id} has entries for undeclared pins: {}",
                join_keys(&pins)
            )));
        }

        Ok(node)
    }
}

fn decode_edges(node_id: &NodeId, pin_id: &str, entry: Value) -> Result<Vec<PinRef>> {
    let Value::Array(edges) = entry else {
        return Err(Error::malformed_document(format!(
            "edges of pin {node_id}.{pin_id} must be an array"
        )));
    };
    edges
        .iter()
        .map(|edge| match edge {
            Value::String(edge) => PinRef::decode(edge),
            other => Err(Error::malformed_document(format!(
                "edge of pin {node_id}.{pin_id} must be a string, got {other}"
            ))),
        })
        .collect()
}

fn join_keys(map: &Map<String, Value>) -> String {
    map.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// A whole graph: every node document together with its kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Node entries in node id order.
    pub nodes: Vec<NodeEntry>,
}

/// One node of a [`GraphDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEntry {
    /// Kind id of the node.
    pub kind: String,
    /// The node document.
    pub node: Value,
}

impl GraphDocument {
    /// Renders the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromStr for GraphDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|error| {
            Error::malformed_document(format!("invalid graph document: {error}")).with_source(error)
        })
    }
}

impl Graph {
    /// Serializes every node of the graph, in id order.
    pub fn to_document(&self) -> Result<GraphDocument> {
        let nodes = self
            .nodes()
            .map(|node| {
                Ok(NodeEntry {
                    kind: node.kind().to_owned(),
                    node: node.to_json()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(GraphDocument { nodes })
    }

    /// Loads a graph from a document, then checks its edge invariants.
    pub fn from_document<V, P>(provider: &P, document: GraphDocument) -> Result<Self>
    where
        P: NodeProvider<V> + ?Sized,
    {
        let mut graph = Graph::new();
        for entry in document.nodes {
            let node = provider.load_json(&entry.kind, entry.node)?;
            graph.insert(node)?;
        }
        graph.validate()?;

        tracing::debug!(
            target: TRACING_TARGET_GRAPH,
            nodes = graph.len(),
            "Graph loaded from document"
        );

        Ok(graph)
    }
}
