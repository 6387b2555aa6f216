//! Mandate CLI - Command-line interface for the compliance workbench.
//!
//! # Usage
//!
//! ```bash
//! # Show the compliance dashboard
//! mandate dashboard
//!
//! # Browse fixed income holdings of portfolio XYZ, smallest positions first
//! mandate portfolio --portfolio XYZ --asset-class fixed-income --sort position_size --asc
//!
//! # Run a compliance check against the agent service
//! MANDATE_API_URL=https://agents.example.com/api mandate check guideline.pdf
//!
//! # Compare two guideline versions
//! mandate compare v1.0 v2.1
//!
//! # Export the ESG rules
//! mandate rules --search esg --export
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands, OutputFormat};
use commands::config::Settings;

fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = if verbose > 0 || quiet {
        EnvFilter::new(default)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let settings = Settings::load_or_default();
    let format = cli.format.unwrap_or_else(|| settings.format());
    if format != OutputFormat::Table || !settings.use_colors() {
        colored::control::set_override(false);
    }
    if format == OutputFormat::Table && !cli.quiet && !matches!(cli.command, Commands::Config(_)) {
        output::print_app_header();
    }

    match cli.command {
        Commands::Dashboard(args) => commands::dashboard::execute(args, format)?,
        Commands::Portfolio(args) => {
            commands::portfolio::execute(args, format, &settings.default_portfolio())?;
        }
        Commands::Check(args) => {
            commands::check::execute(args, format, &settings, cli.quiet).await?;
        }
        Commands::Compare(args) => {
            commands::compare::execute(args, format, settings.comparison_delay(), cli.quiet)
                .await?;
        }
        Commands::Rules(args) => commands::rules::execute(args, format)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}
