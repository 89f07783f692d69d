//! # Similarity CLI Binary
//!
//! Command-line interface for player similarity lookups.

use anyhow::Result;
use clap::Parser;
use similarity_engine::cli::{load_config, Cli, CliHandler};
use similarity_engine::logging::initialize_logging;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration and initialize logging
    let config = load_config(cli.config.as_deref())?;
    initialize_logging(&config.logging.level, &config.logging.format)?;

    // Create CLI handler
    let handler = CliHandler::new(&cli.data, config)?;

    // Handle command
    handler.handle_command(cli.command)?;

    Ok(())
}
