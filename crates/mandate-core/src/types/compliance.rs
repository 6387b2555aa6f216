//! Compliance-check payloads returned by the coordinator agent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValueUnit;
use crate::badge::{Badge, ToBadge, Tone};
use crate::error::{CoreError, CoreResult};

// =============================================================================
// SEVERITY / PRIORITY
// =============================================================================

/// Severity of a guideline breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Must be remediated; the guideline is strictly violated.
    HardBreach,
    /// Tolerance or best-effort limit exceeded.
    SoftBreach,
    /// Any severity the agent reports that this build does not know.
    #[serde(other)]
    Unrecognized,
}

impl Severity {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::HardBreach => "hard_breach",
            Severity::SoftBreach => "soft_breach",
            Severity::Unrecognized => "unrecognized",
        }
    }
}

impl ToBadge for Severity {
    fn badge(&self) -> Badge {
        match self {
            Severity::HardBreach => Badge::new("Hard Breach", Tone::Critical),
            Severity::SoftBreach => Badge::new("Soft Breach", Tone::Caution),
            Severity::Unrecognized => Badge::new("Unrecognized", Tone::Neutral),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "hard_breach" | "hard" => Ok(Severity::HardBreach),
            "soft_breach" | "soft" => Ok(Severity::SoftBreach),
            _ => Err(CoreError::unknown("severity", s)),
        }
    }
}

/// Remediation priority of a breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Act now.
    Immediate,
    /// Act within days.
    High,
    /// Act within the review cycle.
    Medium,
    /// Monitor.
    Low,
    /// Any priority the agent reports that this build does not know.
    #[serde(other)]
    Unrecognized,
}

impl Priority {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Immediate => "immediate",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Unrecognized => "unrecognized",
        }
    }
}

impl ToBadge for Priority {
    fn badge(&self) -> Badge {
        match self {
            Priority::Immediate => Badge::new("Immediate", Tone::Critical),
            Priority::High => Badge::new("High", Tone::Warning),
            Priority::Medium => Badge::new("Medium", Tone::Caution),
            Priority::Low => Badge::new("Low", Tone::Neutral),
            Priority::Unrecognized => Badge::new("Unspecified", Tone::Neutral),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "immediate" => Ok(Priority::Immediate),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(CoreError::unknown("priority", s)),
        }
    }
}

// =============================================================================
// OVERALL STATUS
// =============================================================================

/// Free-form overall status reported by the agent (e.g. `breaches_detected`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverallStatus(pub String);

impl OverallStatus {
    /// Status the agent reports when at least one breach was found.
    pub const BREACHES_DETECTED: &'static str = "breaches_detected";

    /// Creates a status.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// Returns the raw status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display label: underscores become spaces, upper-cased.
    #[must_use]
    pub fn label(&self) -> String {
        self.0.replace('_', " ").to_uppercase()
    }

    /// Returns true when the status reports breaches.
    #[must_use]
    pub fn is_breach(&self) -> bool {
        self.0 == Self::BREACHES_DETECTED
    }

    /// Badge tone for the status.
    #[must_use]
    pub fn tone(&self) -> Tone {
        if self.is_breach() {
            Tone::Critical
        } else {
            Tone::Info
        }
    }
}

// =============================================================================
// PAYLOAD
// =============================================================================

/// A single guideline violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreachDetail {
    /// Breach identifier (e.g. `BR003`).
    pub breach_id: String,
    /// Severity.
    pub severity: Severity,
    /// Free-text description.
    pub description: String,
    /// Observed value.
    pub current_value: Decimal,
    /// Guideline limit.
    pub threshold_value: Decimal,
    /// Amount over the limit; the sign is reported as-is.
    pub excess_amount: Decimal,
    /// Remediation priority.
    pub remediation_priority: Priority,
    /// Suggested remediation steps.
    #[serde(default)]
    pub recommended_actions: Vec<String>,
    /// Unit shared by the three values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<ValueUnit>,
}

impl BreachDetail {
    /// Absolute excess, as shown in breach tables.
    #[must_use]
    pub fn excess_magnitude(&self) -> Decimal {
        self.excess_amount.abs()
    }

    /// Formats a value of this breach using its unit tag.
    #[must_use]
    pub fn format_value(&self, value: Decimal) -> String {
        ValueUnit::format_tagged(self.unit, value)
    }
}

/// Rule and breach counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// Rules the extraction agent found.
    pub total_rules_extracted: u32,
    /// Rules checked against holdings.
    pub total_rules_checked: u32,
    /// Breaches of any severity.
    pub total_breaches: u32,
    /// Hard breaches.
    pub hard_breaches: u32,
    /// Soft breaches.
    pub soft_breaches: u32,
    /// Remediation actions proposed.
    pub remediation_actions_recommended: u32,
}

/// Quality of the rule extraction step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRulesSummary {
    /// Rules extracted.
    pub total_extracted: u32,
    /// Rules flagged as ambiguous.
    pub ambiguous_rules_flagged: u32,
    /// Extraction confidence (0-1).
    pub confidence_score: Decimal,
}

/// Remediation overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemediationSummary {
    /// Breaches needing immediate action.
    pub immediate_actions_required: u32,
    /// Estimated total remediation cost.
    pub estimated_total_cost: Decimal,
    /// Suggested timeline.
    pub recommended_timeline: String,
}

/// Result of a complete compliance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceDashboard {
    /// Overall status.
    pub overall_status: OverallStatus,
    /// Compliance score (0-100).
    pub compliance_score: Decimal,
    /// Counts.
    pub summary: ComplianceSummary,
    /// Extraction quality.
    #[serde(default)]
    pub extracted_rules_summary: ExtractedRulesSummary,
    /// Breaches.
    #[serde(default)]
    pub breach_details: Vec<BreachDetail>,
    /// Remediation overview.
    pub remediation_summary: RemediationSummary,
}

impl ComplianceDashboard {
    /// Decodes a dashboard from JSON text.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Which coordinator stages completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowExecution {
    /// Rule extraction finished.
    pub rule_extraction_completed: bool,
    /// Compliance check finished.
    pub compliance_check_completed: bool,
    /// Remediation analysis finished.
    pub remediation_analysis_completed: bool,
    /// Stage errors.
    pub errors: Vec<String>,
}

impl WorkflowExecution {
    /// Returns true when every stage completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rule_extraction_completed
            && self.compliance_check_completed
            && self.remediation_analysis_completed
    }
}

/// Result payload of the compliance coordinator agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorResult {
    /// The dashboard.
    pub compliance_dashboard: ComplianceDashboard,
    /// Stage report.
    #[serde(default)]
    pub workflow_execution: WorkflowExecution,
}

impl CoordinatorResult {
    /// Decodes a coordinator result from an arbitrary JSON value.
    pub fn from_value(value: serde_json::Value) -> CoreResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
