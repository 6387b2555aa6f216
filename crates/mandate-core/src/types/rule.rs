//! Rules extracted from an investment guideline document.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Severity, ValueUnit};
use crate::error::CoreResult;

/// A single guideline rule.
///
/// Every field is optional on the wire; the extraction agent omits what it
/// could not determine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRule {
    /// Rule identifier (e.g. `R003`).
    #[serde(default)]
    pub rule_id: Option<String>,
    /// Category (Risk, ESG, Cash, ...).
    #[serde(default)]
    pub category: Option<String>,
    /// Rule text.
    #[serde(default)]
    pub description: Option<String>,
    /// Numeric limit.
    #[serde(default)]
    pub threshold: Option<Decimal>,
    /// Unit of the limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_unit: Option<ValueUnit>,
    /// Severity of a violation.
    #[serde(default)]
    pub severity: Option<Severity>,
}

impl ExtractedRule {
    /// Returns the rule id or an empty string.
    #[must_use]
    pub fn id(&self) -> &str {
        self.rule_id.as_deref().unwrap_or_default()
    }

    /// Returns the category or an empty string.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }

    /// Returns the description or an empty string.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Formats the threshold using its unit tag, or `N/A` when absent.
    #[must_use]
    pub fn threshold_display(&self) -> String {
        match self.threshold {
            Some(value) => ValueUnit::format_tagged(self.threshold_unit, value),
            None => "N/A".to_string(),
        }
    }

    /// Severity, with missing values treated as unrecognized.
    #[must_use]
    pub fn severity_or_unrecognized(&self) -> Severity {
        self.severity.unwrap_or(Severity::Unrecognized)
    }
}

/// Output of the rule-extraction agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleExtractionResult {
    /// Extracted rules.
    #[serde(default)]
    pub extracted_rules: Vec<ExtractedRule>,
    /// Rules the agent could not interpret, passed through untouched.
    #[serde(default)]
    pub ambiguous_rules: Vec<serde_json::Value>,
    /// Reported number of extracted rules.
    #[serde(default)]
    pub total_rules_extracted: u32,
    /// Extraction confidence (0-1).
    #[serde(default)]
    pub confidence_score: Decimal,
}

impl RuleExtractionResult {
    /// Decodes an extraction result from JSON text.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
