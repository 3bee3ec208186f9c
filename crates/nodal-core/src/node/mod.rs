//! Nodes, pins and pin references.
//!
//! A [`Node`] is an instance of a node type: an id, the kind it was created
//! from, its pins and its resolved arguments. Edges live on the pins, each
//! end recording the other as a [`PinRef`].

mod id;
mod pin;
mod pin_ref;

use serde_json::Value;

pub use self::id::NodeId;
pub use self::pin::{Pin, PinIo, PinType};
pub use self::pin_ref::PinRef;

/// Resolved argument values of a node, keyed by parameter name.
///
/// Key order follows the node type's parameter declaration order.
pub type Arguments = serde_json::Map<String, Value>;

/// A node in a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    kind: String,
    pins: Vec<Pin>,
    arguments: Arguments,
}

impl Node {
    pub(crate) fn new(
        id: NodeId,
        kind: impl Into<String>,
        pins: Vec<Pin>,
        arguments: Arguments,
    ) -> Self {
        Self {
            id,
            kind: kind.into(),
            pins,
            arguments,
        }
    }

    /// Returns the node id.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the id of the node type this node was created from.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns all pins in declaration order.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Looks up a pin by id.
    pub fn pin(&self, pin_id: &str) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.pin_id() == pin_id)
    }

    /// Returns the pins that consume values.
    pub fn inputs(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(|pin| pin.io().is_input())
    }

    /// Returns the pins that produce values.
    pub fn outputs(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(|pin| pin.io().is_output())
    }

    /// Returns the resolved arguments.
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Returns a single argument value.
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// Returns a reference to one of this node's pins.
    pub fn pin_ref(&self, pin_id: impl Into<String>) -> PinRef {
        PinRef::new(self.id.clone(), pin_id)
    }

    pub(crate) fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    pub(crate) fn pin_mut(&mut self, pin_id: &str) -> Option<&mut Pin> {
        self.pins.iter_mut().find(|pin| pin.pin_id() == pin_id)
    }

    pub(crate) fn pins_mut(&mut self) -> &mut [Pin] {
        &mut self.pins
    }
}
