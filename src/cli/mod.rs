// src/cli/mod.rs
//! Glue between parsed arguments and the validator.

pub mod args;

pub use self::args::Cli;

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::reporting::ConsoleProgress;
use crate::validator::{RunSummary, Validator};

/// Builds the layered config for a parsed command line.
///
/// # Errors
/// Returns error if `jscheck.toml` exists but is invalid.
pub fn build_config(cli: &Cli) -> Result<Config> {
    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let mut config = Config::load(&root)?;
    config.apply(&cli.overrides());
    Ok(config)
}

/// Runs a full check with terminal output.
///
/// # Errors
/// Returns the first configuration, filesystem, or syntax error.
pub fn handle_check(cli: &Cli) -> Result<RunSummary> {
    let config = build_config(cli)?;
    let mut progress = ConsoleProgress::new(config.verbose);
    let summary = Validator::new(config).run(&mut progress)?;
    Ok(summary)
}
