//! Subcommands of the `nodal` binary.

mod evaluate;
mod inspect;
mod table;
mod types;

use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use nodal_core::prelude::*;

use crate::TRACING_TARGET_COMMAND;

/// The action to perform.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the available node types.
    Types,
    /// Show the nodes of a graph document and their connections.
    Inspect {
        /// Path to the graph document.
        file: PathBuf,
    },
    /// Evaluate a graph document and print every output value.
    Evaluate {
        /// Path to the graph document.
        file: PathBuf,
    },
}

impl Command {
    /// Returns the subcommand name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Types => "types",
            Self::Inspect { .. } => "inspect",
            Self::Evaluate { .. } => "evaluate",
        }
    }

    /// Runs the command against `provider`, writing results to `out`.
    pub fn execute<V, P>(
        &self,
        provider: &P,
        config: EngineConfig,
        out: &mut dyn Write,
    ) -> anyhow::Result<()>
    where
        V: Clone + Display,
        P: NodeProvider<V> + ?Sized,
    {
        tracing::info!(
            target: TRACING_TARGET_COMMAND,
            command = self.name(),
            "Running command"
        );

        match self {
            Self::Types => types::run::<V, P>(provider, out),
            Self::Inspect { file } => {
                let graph = load_graph::<V, P>(provider, file)?;
                inspect::run::<V, P>(provider, &graph, out)
            }
            Self::Evaluate { file } => {
                let graph = load_graph::<V, P>(provider, file)?;
                evaluate::run::<V, P>(provider, &Engine::new(config), &graph, out)
            }
        }
    }
}

/// Builds the node catalog the binary runs against.
///
/// Printer nodes write to standard error so standard output only carries
/// command results.
pub fn catalog() -> Result<NodeRegistry<f64>> {
    nodal_math::registry_with(nodal_math::stderr_sink())
}

/// Reads and loads a graph document from `path`.
fn load_graph<V, P>(provider: &P, path: &Path) -> anyhow::Result<Graph>
where
    P: NodeProvider<V> + ?Sized,
{
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document = text
        .parse::<GraphDocument>()
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let graph = Graph::from_document::<V, P>(provider, document)
        .with_context(|| format!("failed to load {}", path.display()))?;

    tracing::debug!(
        target: TRACING_TARGET_COMMAND,
        path = %path.display(),
        nodes = graph.len(),
        "Graph document loaded"
    );
    Ok(graph)
}
