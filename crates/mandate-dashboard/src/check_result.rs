//! Compact view of a compliance-check result.
//!
//! The agent tab shows a reduced dashboard when the coordinator returned one,
//! and the raw result pretty-printed otherwise.

use mandate_core::badge::{Badge, ToBadge, Tone};
use mandate_core::format::format_currency;
use mandate_core::types::{ComplianceDashboard, CoordinatorResult};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// One row of the compact breach table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompactBreachRow {
    /// Breach id.
    pub breach_id: String,
    /// Severity badge.
    pub severity: Badge,
    /// Description.
    pub description: String,
    /// Priority badge.
    pub priority: Badge,
}

/// Reduced dashboard for the agent tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompactDashboard {
    /// Score text, e.g. `85%`.
    pub score: String,
    /// Total breaches.
    pub total_breaches: u32,
    /// Rules extracted.
    pub rules_extracted: u32,
    /// Breach table; empty when there are no breaches.
    pub breaches: Vec<CompactBreachRow>,
    /// Remediation summary lines.
    pub remediation_lines: Vec<String>,
}

impl CompactDashboard {
    /// Reduces a full dashboard.
    #[must_use]
    pub fn from_dashboard(dashboard: &ComplianceDashboard) -> Self {
        let remediation = &dashboard.remediation_summary;
        Self {
            score: format!("{}%", dashboard.compliance_score.normalize()),
            total_breaches: dashboard.summary.total_breaches,
            rules_extracted: dashboard.summary.total_rules_extracted,
            breaches: dashboard
                .breach_details
                .iter()
                .map(|b| CompactBreachRow {
                    breach_id: b.breach_id.clone(),
                    severity: b.severity.badge(),
                    description: b.description.clone(),
                    priority: b.remediation_priority.badge(),
                })
                .collect(),
            remediation_lines: vec![
                format!(
                    "Immediate actions required: {}",
                    remediation.immediate_actions_required
                ),
                format!(
                    "Estimated cost: {}",
                    format_currency(remediation.estimated_total_cost)
                ),
                format!("Timeline: {}", remediation.recommended_timeline),
            ],
        }
    }
}

/// Body of the result card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum CheckResultBody {
    /// The result carried a decodable dashboard.
    Dashboard(CompactDashboard),
    /// Anything else, pretty-printed JSON.
    Raw(String),
}

/// Result card of the agent tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResultView {
    /// Response status (`success` or `error`).
    pub status: String,
    /// Status badge tone.
    pub status_tone: Tone,
    /// Card body.
    pub body: CheckResultBody,
}

impl CheckResultView {
    /// Builds the card from a normalised agent response.
    #[must_use]
    pub fn new(status: &str, result: &Value) -> Self {
        let status_tone = if status == "success" {
            Tone::Info
        } else {
            Tone::Critical
        };

        let body = match result.get("compliance_dashboard") {
            Some(_) => match CoordinatorResult::from_value(result.clone()) {
                Ok(coordinator) => CheckResultBody::Dashboard(CompactDashboard::from_dashboard(
                    &coordinator.compliance_dashboard,
                )),
                Err(err) => {
                    warn!(error = %err, "Result has an undecodable compliance_dashboard");
                    CheckResultBody::Raw(pretty(result))
                }
            },
            None => CheckResultBody::Raw(pretty(result)),
        };

        Self {
            status: status.to_string(),
            status_tone,
            body,
        }
    }

    /// The decoded dashboard, if any.
    #[must_use]
    pub fn dashboard(&self) -> Option<&CompactDashboard> {
        match &self.body {
            CheckResultBody::Dashboard(d) => Some(d),
            CheckResultBody::Raw(_) => None,
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
