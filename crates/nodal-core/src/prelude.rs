//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use nodal_core::prelude::*;
//! ```

pub use crate::document::{GraphDocument, NodeEntry};
pub use crate::engine::{Engine, EngineConfig, Evaluation, ValueTable};
pub use crate::error::{Error, ErrorKind, Result, Side};
pub use crate::graph::Graph;
pub use crate::node::{Arguments, Node, NodeId, Pin, PinIo, PinRef, PinType};
pub use crate::node_type::{NodeType, NodeTypeBuilder, Operator};
pub use crate::param::{ChoiceParameter, Parameter, Parameters, RangeParameter};
pub use crate::provider::NodeProvider;
pub use crate::registry::NodeRegistry;
