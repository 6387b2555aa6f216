//! Portfolio command implementation.
//!
//! Browses the holdings of one portfolio with search, asset-class filter and
//! column sort, and exports the visible rows to CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mandate_core::badge::ToBadge;
use mandate_core::format::{format_currency, format_percent};
use mandate_portfolio::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{
    paint, print_header, print_json, print_output, print_success, print_table, print_warning,
    KeyValue,
};

/// Width of the weight bar in characters.
const BAR_WIDTH: usize = 10;

/// Arguments for the portfolio command.
#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// Portfolio id [default: the `default_portfolio` setting]
    #[arg(short, long)]
    pub portfolio: Option<String>,

    /// Search security name, ticker or sector (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Asset class: all, equity, fixed-income, alternatives, cash
    #[arg(short, long, default_value = "all")]
    pub asset_class: String,

    /// Sort column: security_name, ticker, asset_class, position_size, weight, rating, sector
    #[arg(long, default_value = "weight")]
    pub sort: String,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,

    /// Load holdings from a CSV file instead of the samples
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Write the visible holdings to CSV [default file: portfolio_<ID>_holdings.csv]
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// List portfolio ids and exit
    #[arg(long)]
    pub list: bool,
}

/// Holdings table row.
#[derive(Debug, Serialize, Tabled)]
pub struct HoldingRow {
    #[tabled(rename = "Security Name")]
    pub security_name: String,
    #[tabled(rename = "Ticker")]
    pub ticker: String,
    #[tabled(rename = "Asset Class")]
    pub asset_class: String,
    #[tabled(rename = "Position Size")]
    pub position_size: String,
    #[tabled(rename = "Weight %")]
    pub weight: String,
    #[tabled(rename = "")]
    pub bar: String,
    #[tabled(rename = "Rating")]
    pub rating: String,
    #[tabled(rename = "Sector")]
    pub sector: String,
}

impl From<&Holding> for HoldingRow {
    fn from(h: &Holding) -> Self {
        Self {
            security_name: h.security_name.clone(),
            ticker: h.ticker.clone(),
            asset_class: paint(&h.asset_class.badge()),
            position_size: format_currency(h.position_size),
            weight: format_percent(h.weight, 1),
            bar: weight_bar(h),
            rating: h.rating_display().to_string(),
            sector: h.sector.clone(),
        }
    }
}

/// Renders the weight bar, filled in proportion to [`Holding::weight_bar_pct`].
fn weight_bar(holding: &Holding) -> String {
    let pct = holding.weight_bar_pct().to_f64().unwrap_or_default();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

#[derive(Serialize)]
struct PortfolioOutput<'a> {
    summary: PortfolioSummary,
    alerts: Vec<String>,
    query: &'a HoldingsQuery,
    holdings: Vec<&'a Holding>,
}

/// Execute the portfolio command.
pub fn execute(args: PortfolioArgs, format: OutputFormat, default_portfolio: &str) -> Result<()> {
    let store = match &args.file {
        Some(path) => HoldingsStore::from_csv_path(path)
            .with_context(|| format!("Cannot load holdings from {}", path.display()))?,
        None => HoldingsStore::sample(),
    };

    if args.list {
        for id in store.portfolio_ids() {
            println!("{id}");
        }
        return Ok(());
    }

    let portfolio_id = args.portfolio.as_deref().unwrap_or(default_portfolio);
    let query = build_query(&args)?;
    let summary = store.summary(portfolio_id)?;
    let visible = store.query(portfolio_id, &query)?;

    if let Some(target) = &args.export {
        let path = target
            .clone()
            .unwrap_or_else(|| PathBuf::from(export_filename(portfolio_id)));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Cannot create {}", path.display()))?;
        write_holdings_csv(file, visible.iter().copied())?;
        info!(path = %path.display(), rows = visible.len(), "Exported holdings");
        print_success(&format!(
            "Exported {} holdings to {}",
            visible.len(),
            path.display()
        ));
        return Ok(());
    }

    let alerts: Vec<String> = summary
        .alerts(&AllocationLimits::default())
        .iter()
        .map(AllocationAlert::message)
        .collect();

    match format {
        OutputFormat::Json => print_json(&PortfolioOutput {
            summary,
            alerts,
            query: &query,
            holdings: visible,
        }),
        OutputFormat::Csv => {
            print!("{}", holdings_csv_string(visible.iter().copied())?);
            Ok(())
        }
        OutputFormat::Minimal => {
            for h in &visible {
                println!("{}", h.ticker);
            }
            Ok(())
        }
        OutputFormat::Table => {
            print_header(&format!("{} ({})", summary.portfolio_name, summary.portfolio_id));
            let tiles = vec![
                KeyValue::new("Total Holdings", summary.holdings_count.to_string()),
                KeyValue::new("Total AUM", summary.aum_display()),
                KeyValue::new(
                    "Equity Allocation",
                    summary.allocation_display(AssetClass::Equity),
                ),
                KeyValue::new("Cash Allocation", summary.allocation_display(AssetClass::Cash)),
            ];
            print_output(&tiles, format)?;
            for alert in &alerts {
                print_warning(alert);
            }

            print_header("Holdings");
            println!(
                "{} | {} | sorted by {} {}",
                if query.search.is_empty() { "No search" } else { query.search.as_str() },
                query.asset_class,
                query.sort.column.as_str(),
                if args.asc { "ascending" } else { "descending" }
            );
            let rows: Vec<HoldingRow> = visible.iter().map(|h| HoldingRow::from(*h)).collect();
            print_table(&rows)?;
            println!("Showing {} of {} holdings", rows.len(), summary.holdings_count);
            Ok(())
        }
    }
}

fn build_query(args: &PortfolioArgs) -> Result<HoldingsQuery> {
    let asset_class: AssetClassFilter = args.asset_class.parse().map_err(|_| {
        CliError::invalid(
            "asset class",
            &args.asset_class,
            "Use all, equity, fixed-income, alternatives, or cash.",
        )
    })?;
    let column: SortColumn = args.sort.parse().map_err(|_| {
        let names: Vec<&str> = SortColumn::ALL.iter().map(SortColumn::as_str).collect();
        CliError::invalid("sort column", &args.sort, format!("Use {}.", names.join(", ")))
    })?;
    let direction = if args.asc {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };

    Ok(HoldingsQuery::new()
        .with_search(args.search.clone())
        .with_asset_class(asset_class)
        .with_sort(column, direction))
}
