//! Rules command implementation.
//!
//! Searches the rules library and exports the visible rules to CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mandate_guidelines::prelude::*;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::cli::OutputFormat;
use crate::output::{paint, print_header, print_json, print_success, print_table, print_warning};

/// Arguments for the rules command.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Search description or category (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Load rules from a rule-extraction result (JSON) instead of the samples
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Write the visible rules to CSV [default file: rules_library.csv]
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,
}

/// Rules table row.
#[derive(Debug, Serialize, Tabled)]
pub struct RuleTableRow {
    #[tabled(rename = "Rule ID")]
    pub rule_id: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Threshold")]
    pub threshold: String,
    #[tabled(rename = "Severity")]
    pub severity: String,
}

impl From<RuleRow> for RuleTableRow {
    fn from(row: RuleRow) -> Self {
        Self {
            severity: paint(&row.severity),
            rule_id: row.rule_id,
            category: row.category,
            description: row.description,
            threshold: row.threshold,
        }
    }
}

#[derive(Serialize)]
struct RulesOutput {
    showing: usize,
    total: usize,
    rules: Vec<RuleRow>,
    ambiguous_rules: usize,
}

/// Execute the rules command.
pub fn execute(args: RulesArgs, format: OutputFormat) -> Result<()> {
    let library = match &args.file {
        Some(path) => RulesLibrary::from_path(path)
            .with_context(|| format!("Cannot load rules from {}", path.display()))?,
        None => RulesLibrary::sample(),
    };
    let visible = library.filter(&args.search);

    if let Some(target) = &args.export {
        let path = target
            .clone()
            .unwrap_or_else(|| PathBuf::from(RULES_EXPORT_FILENAME));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Cannot create {}", path.display()))?;
        write_rules_csv(file, visible.iter().copied())?;
        info!(path = %path.display(), rows = visible.len(), "Exported rules");
        print_success(&format!("Exported {} rules to {}", visible.len(), path.display()));
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_json(&RulesOutput {
            showing: visible.len(),
            total: library.len(),
            rules: visible.iter().map(|r| RuleRow::from_rule(r)).collect(),
            ambiguous_rules: library.ambiguous().len(),
        }),
        OutputFormat::Csv => {
            print!("{}", rules_csv_string(visible.iter().copied())?);
            Ok(())
        }
        OutputFormat::Minimal => {
            for rule in &visible {
                println!("{}", rule.id());
            }
            Ok(())
        }
        OutputFormat::Table => {
            print_header("Rules Library");
            let rows: Vec<RuleTableRow> = visible
                .iter()
                .map(|r| RuleTableRow::from(RuleRow::from_rule(r)))
                .collect();
            print_table(&rows)?;
            println!("{}", library.count_label(visible.len()));
            if !library.ambiguous().is_empty() {
                print_warning(&format!(
                    "{} rule(s) could not be interpreted; review the source document",
                    library.ambiguous().len()
                ));
            }
            Ok(())
        }
    }
}
