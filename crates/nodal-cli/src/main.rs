#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use std::io;
use std::process;

use anyhow::Context;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "nodal_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "nodal_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "nodal_cli::command";

fn main() {
    let Err(error) = run() else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_COMMAND,
            error = %format!("{error:#}"),
            "Command terminated with error"
        );
    }
    eprintln!("Error: {error:#}");

    process::exit(1);
}

/// Main application entry point.
fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing(&cli.log)?;
    cli.log();

    let engine = cli.engine.to_engine_config()?;
    let registry = commands::catalog().context("failed to build the node catalog")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli.command.execute(&registry, engine, &mut out)
}
