//! Tracing initialization and configuration.

use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogConfig, LogFormat};

/// Initializes the tracing subscriber for structured logging.
///
/// # Configuration
///
/// The filter is read from `RUST_LOG`. If it is not set, the configured
/// `--log-filter` directives are used instead.
///
/// ```bash
/// RUST_LOG=nodal_core::engine=trace nodal evaluate graph.json
/// ```
///
/// # Errors
///
/// Returns an error if the filter directives are invalid or a subscriber is
/// already installed.
pub(super) fn init_tracing(config: &LogConfig) -> anyhow::Result<()> {
    let env_filter = create_env_filter(&config.log_filter)?;
    let fmt_layer = create_fmt_layer(config.log_format);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    Ok(())
}

/// Creates an environment filter, falling back to `directives`.
fn create_env_filter(directives: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {e}"))
}

/// Creates a formatted tracing layer writing to standard error.
fn create_fmt_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true);

    match format {
        LogFormat::Text => layer.with_ansi(true).boxed(),
        LogFormat::Json => layer.json().with_ansi(false).boxed(),
    }
}
