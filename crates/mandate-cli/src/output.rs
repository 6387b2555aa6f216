//! Output formatting utilities.

use chrono::Local;
use colored::{ColoredString, Colorize};
use mandate_core::badge::{Badge, Tone};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Application title printed above table output.
pub const APP_TITLE: &str = "GSAM Compliance Officer";

/// Subtitle under [`APP_TITLE`].
pub const APP_SUBTITLE: &str = "Goldman Sachs Asset Management";

/// Formats and prints a list of rows.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints the first field of each row.
fn print_minimal<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    for item in data {
        if let Some(first) = item.fields().first() {
            println!("{first}");
        }
    }
    Ok(())
}

/// Applies the colour of a badge tone.
pub fn tinted(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Critical => text.red().bold(),
        Tone::Warning => text.truecolor(234, 88, 12),
        Tone::Caution => text.yellow(),
        Tone::Positive => text.green(),
        Tone::Info => text.blue(),
        Tone::Accent => text.magenta(),
        Tone::Neutral => text.normal(),
    }
}

/// Renders a badge label in its tone.
pub fn paint(badge: &Badge) -> String {
    tinted(badge.label, badge.tone).to_string()
}

/// Prints the application banner with today's date.
pub fn print_app_header() {
    let today = Local::now().format("%Y-%m-%d");
    println!("{}  {}", APP_TITLE.bold(), format!("[{today}]").dimmed());
    println!("{}", APP_SUBTITLE.dimmed());
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Prints a divider line.
pub fn print_divider() {
    println!("{}", "─".repeat(60).dimmed());
}
