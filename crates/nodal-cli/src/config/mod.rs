//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── command: Command     # types | inspect <FILE> | evaluate <FILE>
//! ├── log: LogConfig       # Log filter and line format
//! └── engine: EngineArgs   # Evaluation limits
//! ```
//!
//! Every option can be given as an argument or through its environment
//! variable. Use `--help` to see all available options.

mod engine;
mod log;

use std::process;

use clap::Parser;
pub use engine::EngineArgs;
pub use log::{LogConfig, LogFormat};

use crate::TRACING_TARGET_STARTUP;
use crate::commands::Command;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "nodal")]
#[command(about = "List, inspect and evaluate nodal graphs")]
#[command(version)]
pub struct Cli {
    /// The command to run.
    #[command(subcommand)]
    pub command: Command,

    /// Logging configuration.
    #[clap(flatten)]
    pub log: LogConfig,

    /// Evaluation engine configuration.
    #[clap(flatten)]
    pub engine: EngineArgs,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is read first so that clap's `env` lookups see its values.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs build information and configuration at debug level.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        self.log.log();
        self.engine.log();
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
