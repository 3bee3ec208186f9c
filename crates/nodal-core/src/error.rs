//! Error types for node graph construction, mutation and evaluation.

use std::fmt::Display;

use serde_json::Value;
use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

use crate::node::{NodeId, PinRef};

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur in nodal-core operations.
///
/// Every failure is synchronous and raised at the point of detection;
/// nothing in this crate retries or recovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// No node type is registered under the requested kind id.
    UnknownNodeType,
    /// A node type with the same kind id is already registered.
    DuplicateNodeType,
    /// A node type definition is inconsistent.
    InvalidNodeType,
    /// Arguments contained keys that the node type does not declare.
    UnknownParameter,
    /// An argument value was rejected by its parameter's check.
    InvalidParameterValue,
    /// A non multi-connect pin already holds an edge.
    ConnectionLimitExceeded,
    /// The pins cannot be connected (direction or type mismatch).
    IncompatibleConnection,
    /// The edge to remove does not exist.
    EdgeNotFound,
    /// The dependency relation contains a cycle.
    GraphCycle,
    /// An input edge refers to a value that was never produced.
    MissingValue,
    /// A node or graph document does not have the expected shape.
    MalformedGraphDocument,
    /// The referenced node does not exist in the graph.
    UnknownNode,
    /// The referenced pin does not exist on its node.
    UnknownPin,
    /// A node with the same id already exists in the graph.
    DuplicateNode,
    /// An edge is recorded on one side only, or a pin exceeds its arity.
    InconsistentEdge,
    /// A node's computation failed.
    NodeFailed,
    /// The graph exceeds the engine's configured node limit.
    GraphTooLarge,
    /// Serialization/deserialization error.
    Serialization,
}

/// The end of a connection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    /// The output end of the edge.
    Source,
    /// The input end of the edge.
    Destination,
}

/// A structured error type for nodal-core operations.
#[derive(Debug, Error)]
#[error("{kind}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional error message.
    pub message: Option<String>,
    /// Node the error is attributed to, if any.
    pub node: Option<NodeId>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            node: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attributes this error to a node.
    pub fn with_node(mut self, node: impl Into<NodeId>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates an unknown node type error.
    pub fn unknown_node_type(kind: &str) -> Self {
        Self::new(ErrorKind::UnknownNodeType).with_message(format!("no node type `{kind}`"))
    }

    /// Creates a duplicate node type error.
    pub fn duplicate_node_type(kind: &str) -> Self {
        Self::new(ErrorKind::DuplicateNodeType)
            .with_message(format!("node type `{kind}` is already registered"))
    }

    /// Creates an invalid node type error.
    pub fn invalid_node_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidNodeType).with_message(message)
    }

    /// Creates an unknown parameter error listing the unconsumed argument keys.
    pub fn unknown_parameter<I, S>(kind: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Display,
    {
        let keys = keys
            .into_iter()
            .map(|key| key.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(ErrorKind::UnknownParameter)
            .with_message(format!("node type `{kind}` has no parameter(s): {keys}"))
    }

    /// Creates an invalid parameter value error naming the parameter and value.
    pub fn invalid_parameter_value(parameter: &str, value: &Value) -> Self {
        Self::new(ErrorKind::InvalidParameterValue)
            .with_message(format!("invalid value for parameter `{parameter}`: {value}"))
    }

    /// Creates a connection limit error for one side of a connection.
    pub fn connection_limit_exceeded(side: Side, pin: &PinRef) -> Self {
        Self::new(ErrorKind::ConnectionLimitExceeded)
            .with_message(format!("{side} pin {pin} does not accept another connection"))
            .with_node(pin.node.clone())
    }

    /// Creates an incompatible connection error.
    pub fn incompatible_connection(source: &PinRef, destination: &PinRef) -> Self {
        Self::new(ErrorKind::IncompatibleConnection)
            .with_message(format!("cannot connect {source} to {destination}"))
    }

    /// Creates an edge not found error.
    pub fn edge_not_found(source: &PinRef, destination: &PinRef) -> Self {
        Self::new(ErrorKind::EdgeNotFound)
            .with_message(format!("no edge from {source} to {destination}"))
    }

    /// Creates a cycle error naming a node on the cycle.
    pub fn graph_cycle(node: &NodeId) -> Self {
        Self::new(ErrorKind::GraphCycle)
            .with_message(format!("dependency cycle through node {node}"))
            .with_node(node.clone())
    }

    /// Creates a missing value error for an input edge of `consumer`.
    pub fn missing_value(consumer: &NodeId, pin: &PinRef) -> Self {
        Self::new(ErrorKind::MissingValue)
            .with_message(format!("node {consumer} reads {pin}, which has no value"))
            .with_node(consumer.clone())
    }

    /// Creates a malformed document error.
    pub fn malformed_document(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedGraphDocument).with_message(message)
    }

    /// Creates an unknown node error.
    pub fn unknown_node(node: &str) -> Self {
        Self::new(ErrorKind::UnknownNode).with_message(format!("no node `{node}`"))
    }

    /// Creates an unknown pin error.
    pub fn unknown_pin(pin: &PinRef) -> Self {
        Self::new(ErrorKind::UnknownPin)
            .with_message(format!("no pin {pin}"))
            .with_node(pin.node.clone())
    }

    /// Creates a duplicate node error.
    pub fn duplicate_node(node: &NodeId) -> Self {
        Self::new(ErrorKind::DuplicateNode)
            .with_message(format!("node {node} already exists"))
            .with_node(node.clone())
    }

    /// Creates an inconsistent edge error.
    pub fn inconsistent_edge(pin: &PinRef, message: impl Display) -> Self {
        Self::new(ErrorKind::InconsistentEdge)
            .with_message(format!("pin {pin}: {message}"))
            .with_node(pin.node.clone())
    }

    /// Creates a node failure error.
    pub fn node_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NodeFailed).with_message(message)
    }

    /// Creates a graph size limit error.
    pub fn graph_too_large(nodes: usize, limit: usize) -> Self {
        Self::new(ErrorKind::GraphTooLarge)
            .with_message(format!("graph has {nodes} nodes, limit is {limit}"))
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }

    /// Returns the node this error is attributed to, if any.
    pub fn node(&self) -> Option<&NodeId> {
        self.node.as_ref()
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorKind::Serialization)
            .with_message(error.to_string())
            .with_source(error)
    }
}
