//! Dashboard command implementation.
//!
//! Shows the compliance dashboard for a check result, the bundled sample by
//! default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use mandate_dashboard::prelude::*;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::output::{
    paint, print_header, print_json, print_output, print_table, print_warning, tinted,
};

/// Arguments for the dashboard command.
#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Dashboard JSON, bare or as returned by the coordinator agent
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Show the empty view instead of the sample when no file is given
    #[arg(long, conflicts_with = "file")]
    pub no_sample: bool,
}

/// Headline tile row.
#[derive(Debug, Serialize, Tabled)]
pub struct TileRow {
    #[tabled(rename = "Metric")]
    pub title: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Detail")]
    pub caption: String,
}

/// Breach table row.
#[derive(Debug, Serialize, Tabled)]
pub struct BreachTableRow {
    #[tabled(rename = "Breach ID")]
    pub breach_id: String,
    #[tabled(rename = "Severity")]
    pub severity: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Current")]
    pub current: String,
    #[tabled(rename = "Threshold")]
    pub threshold: String,
    #[tabled(rename = "Excess")]
    pub excess: String,
    #[tabled(rename = "Priority")]
    pub priority: String,
}

impl From<&BreachRow> for BreachTableRow {
    fn from(row: &BreachRow) -> Self {
        Self {
            breach_id: row.breach_id.clone(),
            severity: paint(&row.severity),
            description: row.description.clone(),
            current: row.current.clone(),
            threshold: row.threshold.clone(),
            excess: row.excess.clone(),
            priority: paint(&row.priority),
        }
    }
}

/// Execute the dashboard command.
pub fn execute(args: DashboardArgs, format: OutputFormat) -> Result<()> {
    let dashboard = match &args.file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read {}", path.display()))?;
            Some(parse_dashboard(&text).with_context(|| format!("Invalid dashboard in {}", path.display()))?)
        }
        None if args.no_sample => None,
        None => Some(sample_dashboard()),
    };

    match dashboard {
        Some(dashboard) => show(&DashboardView::build(&dashboard), format),
        None => show_empty(format),
    }
}

fn show_empty(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "empty": true,
            "title": EMPTY_STATE_TITLE,
            "hint": EMPTY_STATE_HINT,
        })),
        OutputFormat::Csv | OutputFormat::Minimal => {
            println!("{EMPTY_STATE_TITLE}");
            Ok(())
        }
        OutputFormat::Table => {
            println!();
            println!("{}", EMPTY_STATE_TITLE.bold());
            println!("{}", EMPTY_STATE_HINT.dimmed());
            Ok(())
        }
    }
}

fn show(view: &DashboardView, format: OutputFormat) -> Result<()> {
    let breaches: Vec<BreachTableRow> = view.breaches.iter().map(BreachTableRow::from).collect();

    match format {
        OutputFormat::Json => print_json(view),
        OutputFormat::Csv => print_output(&breaches, format),
        OutputFormat::Minimal => {
            println!("{}", view.status.gauge.label());
            Ok(())
        }
        OutputFormat::Table => {
            if let Some(alert) = &view.ambiguous_alert {
                print_warning(&format!("{}: {}", AmbiguousRulesAlert::TITLE, alert.message()));
            }

            print_header("Compliance Summary");
            let tiles: Vec<TileRow> = view
                .tiles
                .iter()
                .map(|t| TileRow {
                    title: t.title.to_string(),
                    value: tinted(&t.value, t.tone).to_string(),
                    caption: t.caption.clone().unwrap_or_default(),
                })
                .collect();
            print_table(&tiles)?;

            print_header("Compliance Status");
            let status = &view.status;
            println!(
                "Score:     {} / 100",
                tinted(&status.gauge.label(), status.gauge.band.tone())
            );
            println!("Status:    {}", tinted(&status.status_label, status.status_tone));
            println!("Timeline:  {}", status.timeline);
            println!("Est. cost: {}", status.estimated_cost);

            print_header("Breach Details");
            print_table(&breaches)?;

            print_header("Remediation Recommendations");
            for item in &view.remediation {
                println!("{}  {}  {}", item.breach_id.bold(), paint(&item.priority), item.excerpt);
                for action in &item.actions {
                    println!("    - {action}");
                }
            }
            Ok(())
        }
    }
}
