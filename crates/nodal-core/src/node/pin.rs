//! Pins: the typed, directional connection points of a node.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use super::PinRef;

/// Direction of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, EnumString, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PinIo {
    /// Consumes values.
    In,
    /// Produces values.
    Out,
    /// Both consumes and produces values.
    InOut,
}

impl PinIo {
    /// Returns whether the pin consumes values.
    pub const fn is_input(self) -> bool {
        matches!(self, Self::In | Self::InOut)
    }

    /// Returns whether the pin produces values.
    pub const fn is_output(self) -> bool {
        matches!(self, Self::Out | Self::InOut)
    }
}

/// Opaque type tag of a pin, compared only for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, From)]
#[serde(transparent)]
pub struct PinType(String);

impl PinType {
    /// Creates a new type tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PinType {
    fn from(tag: &str) -> Self {
        Self(tag.to_owned())
    }
}

/// A named connection point on a node.
///
/// `targets` lists the peer pins of every incident edge in connection order.
/// Targets are only mutated through [`crate::graph::Graph`], which keeps both
/// ends of an edge in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    pin_id: String,
    multi_connect: bool,
    io: PinIo,
    pin_type: PinType,
    targets: Vec<PinRef>,
}

impl Pin {
    /// Creates a single-connection pin with no edges.
    pub fn new(pin_id: impl Into<String>, io: PinIo, pin_type: impl Into<PinType>) -> Self {
        Self {
            pin_id: pin_id.into(),
            multi_connect: false,
            io,
            pin_type: pin_type.into(),
            targets: Vec::new(),
        }
    }

    /// Creates an input pin.
    pub fn input(pin_id: impl Into<String>, pin_type: impl Into<PinType>) -> Self {
        Self::new(pin_id, PinIo::In, pin_type)
    }

    /// Creates an output pin.
    pub fn output(pin_id: impl Into<String>, pin_type: impl Into<PinType>) -> Self {
        Self::new(pin_id, PinIo::Out, pin_type)
    }

    /// Sets whether the pin may hold more than one edge.
    pub fn with_multi_connect(mut self, multi_connect: bool) -> Self {
        self.multi_connect = multi_connect;
        self
    }

    /// Returns the pin id.
    pub fn pin_id(&self) -> &str {
        &self.pin_id
    }

    /// Returns whether the pin may hold more than one edge.
    pub fn is_multi_connect(&self) -> bool {
        self.multi_connect
    }

    /// Returns the pin direction.
    pub fn io(&self) -> PinIo {
        self.io
    }

    /// Returns the pin type tag.
    pub fn pin_type(&self) -> &PinType {
        &self.pin_type
    }

    /// Returns the peer pins of all incident edges, in connection order.
    pub fn targets(&self) -> &[PinRef] {
        &self.targets
    }

    /// Returns whether the pin has at least one edge.
    pub fn is_connected(&self) -> bool {
        !self.targets.is_empty()
    }

    /// Returns whether another edge may be attached without exceeding arity.
    pub fn accepts_connection(&self) -> bool {
        self.multi_connect || self.targets.is_empty()
    }

    /// Returns whether an edge may carry values from this pin into `destination`.
    pub fn can_feed(&self, destination: &Pin) -> bool {
        self.io.is_output() && destination.io.is_input() && self.pin_type == destination.pin_type
    }

    /// Renders the pin's edges for display.
    ///
    /// Multi-connect pins render as a list, single pins as the peer or `None`.
    pub fn describe_targets(&self) -> String {
        if self.multi_connect {
            let peers = self
                .targets
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            format!("[{}]", peers.join(", "))
        } else {
            match self.targets.as_slice() {
                [] => "None".to_owned(),
                [peer] => peer.to_string(),
                peers => format!("<{} edges>", peers.len()),
            }
        }
    }

    pub(crate) fn push_target(&mut self, peer: PinRef) {
        self.targets.push(peer);
    }

    /// Removes the first edge to `peer`; returns whether one was found.
    pub(crate) fn remove_target(&mut self, peer: &PinRef) -> bool {
        match self.targets.iter().position(|target| target == peer) {
            Some(index) => {
                self.targets.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn count_targets(&self, peer: &PinRef) -> usize {
        self.targets.iter().filter(|target| *target == peer).count()
    }

    pub(crate) fn set_targets(&mut self, targets: Vec<PinRef>) {
        self.targets = targets;
    }

    pub(crate) fn take_targets(&mut self) -> Vec<PinRef> {
        std::mem::take(&mut self.targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_io_directions() {
        assert!(PinIo::In.is_input() && !PinIo::In.is_output());
        assert!(PinIo::Out.is_output() && !PinIo::Out.is_input());
        assert!(PinIo::InOut.is_input() && PinIo::InOut.is_output());
        assert_eq!("in_out".parse::<PinIo>().unwrap(), PinIo::InOut);
    }

    #[test]
    fn test_can_feed_needs_direction_and_type() {
        let out = Pin::output("out", "float");
        let input = Pin::input("a", "float");
        let through = Pin::new("loop", PinIo::InOut, "float");
        assert!(out.can_feed(&input));
        assert!(through.can_feed(&through));
        assert!(!input.can_feed(&out));
        assert!(!out.can_feed(&out));
        assert!(!out.can_feed(&Pin::input("flag", "bool")));
    }

    #[test]
    fn test_accepts_connection() {
        let mut single = Pin::input("a", "float");
        assert!(single.accepts_connection());
        single.push_target(PinRef::new("v1", "out"));
        assert!(!single.accepts_connection());

        let mut multi = Pin::output("out", "float").with_multi_connect(true);
        multi.push_target(PinRef::new("a1", "a"));
        assert!(multi.accepts_connection());
    }

    #[test]
    fn test_remove_target_removes_first_occurrence_only() {
        let mut pin = Pin::output("out", "float").with_multi_connect(true);
        let peer = PinRef::new("p1", "in");
        pin.push_target(peer.clone());
        pin.push_target(PinRef::new("a1", "a"));
        pin.push_target(peer.clone());

        assert!(pin.remove_target(&peer));
        assert_eq!(pin.targets(), &[PinRef::new("a1", "a"), peer.clone()]);
        assert!(!pin.remove_target(&PinRef::new("x", "y")));
    }

    #[test]
    fn test_describe_targets() {
        let mut single = Pin::input("a", "float");
        assert_eq!(single.describe_targets(), "None");
        single.push_target(PinRef::new("v1", "out"));
        assert_eq!(single.describe_targets(), "v1.out");

        let mut multi = Pin::input("in", "float").with_multi_connect(true);
        assert_eq!(multi.describe_targets(), "[]");
        multi.push_target(PinRef::new("a1", "out"));
        multi.push_target(PinRef::new("s1", "out"));
        assert_eq!(multi.describe_targets(), "[a1.out, s1.out]");
    }
}
