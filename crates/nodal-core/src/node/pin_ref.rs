//! References to a pin on a specific node.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::NodeId;
use crate::document::EDGE_DELIMITER;
use crate::error::{Error, ErrorKind, Result};

/// A `(node id, pin id)` pair naming one pin in a graph.
///
/// Pins record their edges as the `PinRef` of the peer pin. The human
/// readable form (`Display`/`FromStr`) is `node.pin`; the document form
/// ([`PinRef::encode`]/[`PinRef::decode`]) is `node|pin`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PinRef {
    /// Id of the node owning the pin.
    pub node: NodeId,
    /// Id of the pin, unique within its node.
    pub pin: String,
}

impl PinRef {
    /// Creates a new pin reference.
    pub fn new(node: impl Into<NodeId>, pin: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            pin: pin.into(),
        }
    }

    /// Encodes the reference as `node|pin`.
    ///
    /// Neither component may contain the delimiter; ids are never escaped.
    pub fn encode(&self) -> Result<String> {
        if self.node.as_str().contains(EDGE_DELIMITER) || self.pin.contains(EDGE_DELIMITER) {
            return Err(Error::malformed_document(format!(
                "pin reference {self} contains the edge delimiter `{EDGE_DELIMITER}`"
            )));
        }
        Ok(format!("{}{EDGE_DELIMITER}{}", self.node, self.pin))
    }

    /// Decodes a `node|pin` edge string.
    pub fn decode(encoded: &str) -> Result<Self> {
        let mut parts = encoded.split(EDGE_DELIMITER);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(node), Some(pin), None) => Ok(Self::new(node, pin)),
            _ => Err(Error::malformed_document(format!(
                "edge `{encoded}` is not of the form `<node>{EDGE_DELIMITER}<pin>`"
            ))),
        }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.pin)
    }
}

impl FromStr for PinRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.rsplit_once('.') {
            Some((node, pin)) if !node.is_empty() && !pin.is_empty() => Ok(Self::new(node, pin)),
            _ => Err(Error::new(ErrorKind::UnknownPin)
                .with_message(format!("expected `<node>.<pin>`, got `{s}`"))),
        }
    }
}
