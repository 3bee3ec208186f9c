//! Logging configuration.

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Line format of emitted log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
///
/// Logs go to standard error so that command output on standard output stays
/// machine-readable. `RUST_LOG`, when set, takes precedence over
/// `--log-filter`.
///
/// # Examples
///
/// ```bash
/// nodal --log-filter nodal_core=debug evaluate graph.json
/// NODAL_LOG_FORMAT=json nodal evaluate graph.json
/// ```
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct LogConfig {
    /// Filter directives used when `RUST_LOG` is not set.
    #[arg(long, env = "NODAL_LOG", default_value = "warn", global = true)]
    pub log_filter: String,

    /// Format of log lines.
    #[arg(
        long,
        env = "NODAL_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Text,
        global = true
    )]
    pub log_format: LogFormat,
}

impl LogConfig {
    /// Logs the configuration at debug level.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            log_filter = %self.log_filter,
            log_format = ?self.log_format,
            "Logging configuration"
        );
    }
}
