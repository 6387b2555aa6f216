//! Check command implementation.
//!
//! Uploads a guideline document to the agent service and runs the
//! compliance coordinator on it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use mandate_agent::prelude::*;
use mandate_dashboard::check_result::{CheckResultBody, CheckResultView, CompactDashboard};
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::commands::config::Settings;
use crate::output::{
    paint, print_header, print_info, print_json, print_output, print_success, print_table,
    tinted, KeyValue,
};

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Guideline document (PDF)
    pub file: PathBuf,

    /// Agent service base URL
    #[arg(long, env = "MANDATE_API_URL")]
    pub api_url: Option<String>,

    /// Agent service API key
    #[arg(long, env = "MANDATE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Agent service settings file (TOML)
    #[arg(long, value_name = "PATH")]
    pub agent_config: Option<PathBuf>,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Write the check result JSON to a file, readable by `mandate dashboard --file`
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

/// Compact breach table row.
#[derive(Debug, Serialize, Tabled)]
pub struct CompactBreachTableRow {
    #[tabled(rename = "Breach ID")]
    pub breach_id: String,
    #[tabled(rename = "Severity")]
    pub severity: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Priority")]
    pub priority: String,
}

/// Resolves agent settings: file or stored settings, then flags and env.
fn resolve_config(args: &CheckArgs, settings: &Settings) -> Result<AgentConfig> {
    let mut config = match &args.agent_config {
        Some(path) => AgentConfig::from_file(path)?,
        None => settings.agent_config(),
    };
    if let Some(url) = args.api_url.as_ref().filter(|u| !u.trim().is_empty()) {
        config.api_base_url = url.clone();
    }
    if let Some(key) = args.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
        config.api_key = Some(key.clone());
    }
    if let Some(secs) = args.timeout {
        config.check_timeout_secs = Some(secs);
    }
    config.validate()?;
    debug!(base_url = %config.base_url(), "Resolved agent config");
    Ok(config)
}

/// Execute the check command.
pub async fn execute(
    args: CheckArgs,
    format: OutputFormat,
    settings: &Settings,
    quiet: bool,
) -> Result<()> {
    let config = resolve_config(&args, settings)?;
    let client = HttpAgentClient::new(&config)?;
    let file = GuidelineFile::from_path(&args.file).await?;

    let show_progress = !quiet && format == OutputFormat::Table;
    if show_progress {
        print_info(&format!("{} ({})", file.name(), file.size_display()));
    }

    let mut flow = ComplianceCheckFlow::new(client);
    if let Some(limit) = config.check_timeout() {
        flow = flow.with_timeout(limit);
    }
    flow.select_file(file);

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupt received, cancelling compliance check");
                cancel.cancel();
            }
        })
    };
    let progress = show_progress.then(|| {
        let mut rx = flow.subscribe();
        tokio::spawn(async move {
            let mut last = 0u8;
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update().clone();
                if let Some(text) = snapshot.progress_text() {
                    if snapshot.progress != last {
                        eprintln!("{} {text}", format!("[{:>3}%]", snapshot.progress).dimmed());
                        last = snapshot.progress;
                    }
                }
            }
        })
    });

    let outcome = flow.run(&cancel).await;
    interrupt.abort();
    drop(flow);
    if let Some(task) = progress {
        super::join_watcher(task).await;
    }

    let response = outcome?;

    if let Some(path) = &args.save {
        let document = response
            .result
            .clone()
            .unwrap_or_else(|| serde_json::to_value(&response).unwrap_or(Value::Null));
        std::fs::write(path, serde_json::to_string_pretty(&document)?)
            .with_context(|| format!("Cannot write {}", path.display()))?;
        if !quiet {
            print_success(&format!("Saved result to {}", path.display()));
        }
    }

    render(&response, format)
}

fn render(response: &NormalizedAgentResponse, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(response);
    }
    if format == OutputFormat::Minimal {
        println!("{}", response.status.as_str());
        return Ok(());
    }

    let Some(result) = &response.result else {
        print_info("The agent returned no result");
        return Ok(());
    };
    let view = CheckResultView::new(response.status.as_str(), result);

    match (&view.body, format) {
        (CheckResultBody::Dashboard(compact), OutputFormat::Csv) => {
            print_output(&compact_rows(compact), format)
        }
        (CheckResultBody::Raw(text), OutputFormat::Csv) => {
            println!("{text}");
            Ok(())
        }
        (body, _) => {
            print_header("Compliance Check Results");
            println!("Status: {}", tinted(&view.status, view.status_tone));
            match body {
                CheckResultBody::Dashboard(compact) => {
                    let tiles = vec![
                        KeyValue::new("Compliance Score", compact.score.clone()),
                        KeyValue::new("Total Breaches", compact.total_breaches.to_string()),
                        KeyValue::new("Rules Extracted", compact.rules_extracted.to_string()),
                    ];
                    print_table(&tiles)?;
                    if !compact.breaches.is_empty() {
                        print_header("Breaches");
                        print_table(&compact_rows(compact))?;
                    }
                    print_header("Remediation Summary");
                    for line in &compact.remediation_lines {
                        println!("{line}");
                    }
                }
                CheckResultBody::Raw(text) => println!("{text}"),
            }
            Ok(())
        }
    }
}

fn compact_rows(compact: &CompactDashboard) -> Vec<CompactBreachTableRow> {
    compact
        .breaches
        .iter()
        .map(|b| CompactBreachTableRow {
            breach_id: b.breach_id.clone(),
            severity: paint(&b.severity),
            description: b.description.clone(),
            priority: paint(&b.priority),
        })
        .collect()
}
