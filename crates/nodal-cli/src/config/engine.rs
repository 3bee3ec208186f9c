//! Evaluation engine arguments.

use anyhow::Context;
use clap::Args;
use nodal_core::engine::{EngineConfig, EngineConfigBuilder};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Limits applied when a graph is evaluated.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct EngineArgs {
    /// Refuse to evaluate graphs with more nodes than this.
    #[arg(long, env = "NODAL_MAX_NODES", global = true)]
    #[serde(default)]
    pub max_nodes: Option<usize>,

    /// Skip the edge consistency check that runs before scheduling.
    #[arg(long, env = "NODAL_SKIP_VALIDATION", global = true)]
    #[serde(default)]
    pub skip_edge_validation: bool,
}

impl EngineArgs {
    /// Builds the engine configuration, rejecting invalid limits.
    pub fn to_engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut builder = EngineConfigBuilder::default();
        builder.validate_edges(!self.skip_edge_validation);
        if let Some(max_nodes) = self.max_nodes {
            builder.max_nodes(max_nodes);
        }
        builder.build().context("invalid engine configuration")
    }

    /// Logs the configuration at debug level.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            max_nodes = ?self.max_nodes,
            skip_edge_validation = self.skip_edge_validation,
            "Engine configuration"
        );
    }
}
