//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::logging;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Create context for commands
    let ctx = commands::Context {
        config_path: cli.config,
        output_format: cli.output.unwrap_or_default(),
        verbose: cli.verbose,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Init => commands::init::execute(ctx).await,
        Commands::External => commands::external::execute(ctx).await,
    }
}
