//! Dashboard view model.
//!
//! [`DashboardView::build`] derives everything the dashboard tab shows from a
//! [`ComplianceDashboard`]: four summary tiles, the status panel with the
//! score gauge, the breach table, the remediation listing and an optional
//! ambiguous-rule alert.

use mandate_core::badge::{Badge, ToBadge, Tone};
use mandate_core::format::format_currency;
use mandate_core::types::{BreachDetail, ComplianceDashboard, Priority, Severity};
use serde::Serialize;
use tracing::debug;

use crate::gauge::ScoreGauge;

/// Headline shown when no dashboard has been loaded.
pub const EMPTY_STATE_TITLE: &str = "No compliance data available";

/// Hint shown under [`EMPTY_STATE_TITLE`].
pub const EMPTY_STATE_HINT: &str = "Upload a guideline document to run a compliance check";

/// Number of description characters shown in the remediation listing.
pub const REMEDIATION_EXCERPT_CHARS: usize = 50;

/// One of the four headline tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTile {
    /// Tile title.
    pub title: &'static str,
    /// Large value text.
    pub value: String,
    /// Small caption under the value.
    pub caption: Option<String>,
    /// Accent colour.
    pub tone: Tone,
}

/// Status panel next to the gauge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusPanel {
    /// Score gauge.
    pub gauge: ScoreGauge,
    /// Overall status label, e.g. `BREACHES DETECTED`.
    pub status_label: String,
    /// Status badge tone; critical when breaches were detected.
    pub status_tone: Tone,
    /// Recommended remediation timeline.
    pub timeline: String,
    /// Estimated remediation cost.
    pub estimated_cost: String,
}

/// One row of the breach table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreachRow {
    /// Breach id.
    pub breach_id: String,
    /// Severity badge.
    pub severity: Badge,
    /// Full description.
    pub description: String,
    /// Observed value.
    pub current: String,
    /// Limit.
    pub threshold: String,
    /// Absolute excess.
    pub excess: String,
    /// Priority badge.
    pub priority: Badge,
}

impl BreachRow {
    /// Formats one breach for the table.
    #[must_use]
    pub fn from_breach(breach: &BreachDetail) -> Self {
        Self {
            breach_id: breach.breach_id.clone(),
            severity: breach.severity.badge(),
            description: breach.description.clone(),
            current: breach.format_value(breach.current_value),
            threshold: breach.format_value(breach.threshold_value),
            excess: breach.format_value(breach.excess_magnitude()),
            priority: breach.remediation_priority.badge(),
        }
    }
}

/// Remediation steps for one breach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationItem {
    /// Breach id.
    pub breach_id: String,
    /// Shortened description followed by `...`.
    pub excerpt: String,
    /// Priority badge.
    pub priority: Badge,
    /// Recommended actions in order.
    pub actions: Vec<String>,
}

impl RemediationItem {
    /// Builds the listing entry for one breach.
    #[must_use]
    pub fn from_breach(breach: &BreachDetail) -> Self {
        Self {
            breach_id: breach.breach_id.clone(),
            excerpt: excerpt(&breach.description, REMEDIATION_EXCERPT_CHARS),
            priority: breach.remediation_priority.badge(),
            actions: breach.recommended_actions.clone(),
        }
    }
}

/// First `max_chars` characters followed by `...`.
///
/// The ellipsis is always appended, even to short text.
#[must_use]
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}

/// Alert shown when the extraction agent flagged ambiguous rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousRulesAlert {
    /// Number of flagged rules.
    pub count: u32,
}

impl AmbiguousRulesAlert {
    /// Alert title.
    pub const TITLE: &'static str = "Ambiguous Rules Detected";

    /// Alert body.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "{} rule(s) contain unclear or ambiguous language. \
             Review these rules in the Rules Library for clarification.",
            self.count
        )
    }
}

/// Everything the dashboard tab shows for one payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Compliance Score, Total Rules, Total Breaches, Actions Required.
    pub tiles: [SummaryTile; 4],
    /// Gauge and status.
    pub status: StatusPanel,
    /// Breach table.
    pub breaches: Vec<BreachRow>,
    /// Remediation listing.
    pub remediation: Vec<RemediationItem>,
    /// Present when at least one rule was flagged ambiguous.
    pub ambiguous_alert: Option<AmbiguousRulesAlert>,
}

impl DashboardView {
    /// Derives the view from a dashboard payload.
    #[must_use]
    pub fn build(dashboard: &ComplianceDashboard) -> Self {
        let summary = &dashboard.summary;
        let remediation = &dashboard.remediation_summary;

        let tiles = [
            SummaryTile {
                title: "Compliance Score",
                value: format!("{}%", dashboard.compliance_score.normalize()),
                caption: None,
                tone: Tone::Info,
            },
            SummaryTile {
                title: "Total Rules",
                value: summary.total_rules_checked.to_string(),
                caption: None,
                tone: Tone::Positive,
            },
            SummaryTile {
                title: "Total Breaches",
                value: summary.total_breaches.to_string(),
                caption: Some(format!(
                    "{} hard, {} soft",
                    summary.hard_breaches, summary.soft_breaches
                )),
                tone: Tone::Critical,
            },
            SummaryTile {
                title: "Actions Required",
                value: remediation.immediate_actions_required.to_string(),
                caption: None,
                tone: Tone::Caution,
            },
        ];

        let status = StatusPanel {
            gauge: ScoreGauge::new(dashboard.compliance_score),
            status_label: dashboard.overall_status.label(),
            status_tone: dashboard.overall_status.tone(),
            timeline: remediation.recommended_timeline.clone(),
            estimated_cost: format_currency(remediation.estimated_total_cost),
        };

        let breaches: Vec<BreachRow> = dashboard
            .breach_details
            .iter()
            .map(BreachRow::from_breach)
            .collect();
        let remediation: Vec<RemediationItem> = dashboard
            .breach_details
            .iter()
            .map(RemediationItem::from_breach)
            .collect();

        let flagged = dashboard.extracted_rules_summary.ambiguous_rules_flagged;
        let ambiguous_alert = (flagged > 0).then_some(AmbiguousRulesAlert { count: flagged });

        debug!(
            breaches = breaches.len(),
            ambiguous = flagged,
            score = %dashboard.compliance_score,
            "Built dashboard view"
        );

        Self {
            tiles,
            status,
            breaches,
            remediation,
            ambiguous_alert,
        }
    }

    /// Tile by title.
    #[must_use]
    pub fn tile(&self, title: &str) -> Option<&SummaryTile> {
        self.tiles.iter().find(|t| t.title == title)
    }

    /// Number of breaches per severity, as listed in the table.
    #[must_use]
    pub fn severity_counts(breaches: &[BreachDetail]) -> (usize, usize) {
        let hard = breaches
            .iter()
            .filter(|b| b.severity == Severity::HardBreach)
            .count();
        let soft = breaches
            .iter()
            .filter(|b| b.severity == Severity::SoftBreach)
            .count();
        (hard, soft)
    }

    /// Breaches that need immediate action.
    #[must_use]
    pub fn immediate(&self) -> Vec<&BreachRow> {
        let immediate = Priority::Immediate.badge();
        self.breaches
            .iter()
            .filter(|row| row.priority == immediate)
            .collect()
    }
}
