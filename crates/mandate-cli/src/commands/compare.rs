//! Compare command implementation.
//!
//! Simulated comparison of two guideline versions.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mandate_guidelines::prelude::*;
use serde::Serialize;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_json, print_output};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Version A, full label or short form such as `v1.0`
    pub version_a: Option<String>,

    /// Version B, full label or short form such as `v2.1`
    pub version_b: Option<String>,

    /// Simulated comparison time [default: the `comparison_delay_ms` setting]
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// List the available versions and exit
    #[arg(long)]
    pub list: bool,
}

/// One change in CSV or table form.
#[derive(Debug, Serialize, Tabled)]
pub struct ChangeRow {
    #[tabled(rename = "Change")]
    pub change: &'static str,
    #[tabled(rename = "Description")]
    pub description: String,
}

/// Maps a short form like `v2.0` to its full label.
pub fn resolve_version(input: &str) -> CliResult<String> {
    let input = input.trim();
    if let Some(exact) = GUIDELINE_VERSIONS.iter().find(|v| **v == input) {
        return Ok((*exact).to_string());
    }
    let needle = format!("{} ", input.to_lowercase());
    let matches: Vec<&str> = GUIDELINE_VERSIONS
        .iter()
        .copied()
        .filter(|v| format!("{} ", v.to_lowercase()).contains(&needle))
        .collect();
    match matches.as_slice() {
        [only] => Ok((*only).to_string()),
        _ => Err(CliError::invalid(
            "version",
            input,
            "Run `mandate compare --list` for the available versions.",
        )),
    }
}

fn change_rows(diff: &VersionDiff) -> Vec<ChangeRow> {
    let tagged = |change: &'static str, items: &[String]| {
        items
            .iter()
            .map(|d| ChangeRow {
                change,
                description: d.clone(),
            })
            .collect::<Vec<_>>()
    };
    let mut rows = tagged("added", &diff.added);
    rows.extend(tagged("removed", &diff.removed));
    rows.extend(tagged("modified", &diff.modified));
    rows
}

/// Execute the compare command.
pub async fn execute(
    args: CompareArgs,
    format: OutputFormat,
    default_delay: Duration,
    quiet: bool,
) -> Result<()> {
    if args.list {
        for version in GUIDELINE_VERSIONS {
            println!("{version}");
        }
        return Ok(());
    }

    let delay = args.delay_ms.map_or(default_delay, Duration::from_millis);
    let mut comparison = VersionComparison::with_delay(delay);
    if let Some(a) = &args.version_a {
        comparison.select_a(&resolve_version(a)?)?;
    }
    if let Some(b) = &args.version_b {
        comparison.select_b(&resolve_version(b)?)?;
    }

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };
    let observer = (!quiet && format == OutputFormat::Table).then(|| {
        let mut rx = comparison.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                if *rx.borrow_and_update() == ComparisonState::Comparing {
                    eprintln!("{}", "Comparing versions...".dimmed());
                }
            }
        })
    });

    let outcome = comparison.compare(&cancel).await;
    interrupt.abort();
    let state = comparison.state();
    drop(comparison);
    if let Some(task) = observer {
        super::join_watcher(task).await;
    }
    let diff = outcome?;

    match format {
        OutputFormat::Json => print_json(&state),
        OutputFormat::Csv => print_output(&change_rows(&diff), format),
        OutputFormat::Minimal => {
            for row in change_rows(&diff) {
                println!("{}: {}", row.change, row.description);
            }
            Ok(())
        }
        OutputFormat::Table => {
            if let ComparisonState::Result {
                version_a,
                version_b,
                ..
            } = &state
            {
                print_header("Comparison Results");
                println!("{} → {}", version_a, version_b);
            }
            for (title, items) in diff.sections() {
                let marker = if title.starts_with("Added") {
                    "+".green()
                } else if title.starts_with("Removed") {
                    "-".red()
                } else {
                    "~".yellow()
                };
                println!("\n{}", title.bold());
                for item in items {
                    println!("  {marker} {item}");
                }
            }
            Ok(())
        }
    }
}
