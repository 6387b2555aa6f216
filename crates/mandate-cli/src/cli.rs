//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    CheckArgs, CompareArgs, ConfigArgs, DashboardArgs, PortfolioArgs, RulesArgs,
};

/// Mandate - Investment guideline compliance workbench
#[derive(Parser, Debug)]
#[command(name = "mandate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format [default: table, or the `default_format` setting]
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress headers and log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the compliance dashboard
    Dashboard(DashboardArgs),

    /// Browse, filter and export portfolio holdings
    Portfolio(PortfolioArgs),

    /// Upload a guideline document and run a compliance check
    Check(CheckArgs),

    /// Compare two guideline versions
    Compare(CompareArgs),

    /// Browse and export the rules library
    Rules(RulesArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (one value per line)
    Minimal,
}

impl OutputFormat {
    /// Parses a format name as stored in the config file.
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}
