//! Graph evaluation.
//!
//! - [`Engine`]: orders and executes a graph
//! - [`EngineConfig`]: configuration options
//! - [`topological_order`]: the scheduling step on its own

mod config;
mod executor;
mod schedule;
mod values;

pub use config::{EngineConfig, EngineConfigBuilder, EngineConfigBuilderError};
pub use executor::{Engine, Evaluation};
pub use schedule::topological_order;
pub use values::ValueTable;
