#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod document;
pub mod engine;
mod error;
pub mod graph;
pub mod node;
pub mod node_type;
pub mod param;
pub mod provider;
pub mod registry;

#[doc(hidden)]
pub mod prelude;

pub use error::{BoxedError, Error, ErrorKind, Result, Side};

/// Tracing target for node type registration and node construction.
pub const TRACING_TARGET_REGISTRY: &str = "nodal_core::registry";

/// Tracing target for graph mutations (insert, remove, connect, disconnect).
pub const TRACING_TARGET_GRAPH: &str = "nodal_core::graph";

/// Tracing target for scheduling and evaluation runs.
pub const TRACING_TARGET_ENGINE: &str = "nodal_core::engine";
