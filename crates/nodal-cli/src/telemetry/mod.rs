//! Telemetry and tracing configuration.

mod tracing;

use anyhow::Context;

use crate::config::LogConfig;

/// Installs the global log subscriber.
///
/// # Errors
///
/// Returns an error if the tracing subscriber fails to initialize.
pub(crate) fn init_tracing(config: &LogConfig) -> anyhow::Result<()> {
    tracing::init_tracing(config).context("Failed to initialize tracing")
}
