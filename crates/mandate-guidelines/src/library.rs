//! Rules library: the rules extracted from a guideline document.

use std::io::Write;
use std::path::Path;

use mandate_core::badge::{Badge, ToBadge};
use mandate_core::types::{ExtractedRule, RuleExtractionResult, Severity, ValueUnit};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{GuidelineError, GuidelineResult};

/// Download file name of the rules export.
pub const RULES_EXPORT_FILENAME: &str = "rules_library.csv";

/// Header row of the rules export.
pub const RULES_HEADER: [&str; 5] = ["Rule ID", "Category", "Description", "Threshold", "Severity"];

fn rule(
    id: &str,
    category: &str,
    description: &str,
    threshold: Decimal,
    unit: ValueUnit,
    severity: Severity,
) -> ExtractedRule {
    ExtractedRule {
        rule_id: Some(id.to_string()),
        category: Some(category.to_string()),
        description: Some(description.to_string()),
        threshold: Some(threshold),
        threshold_unit: Some(unit),
        severity: Some(severity),
    }
}

/// The five sample rules of the bundled guideline.
#[must_use]
pub fn sample_rules() -> Vec<ExtractedRule> {
    vec![
        rule(
            "R001",
            "Performance",
            "Total return must not underperform the Custom Account Benchmark by more than 60 bps gross of fees per annum over full market cycle",
            dec!(0.6),
            ValueUnit::Percent,
            Severity::SoftBreach,
        ),
        rule(
            "R002",
            "Risk",
            "Long-term ex-ante tracking error must not exceed 150 bps p.a.",
            dec!(1.5),
            ValueUnit::Percent,
            Severity::SoftBreach,
        ),
        rule(
            "R003",
            "ESG",
            "No positions allowed in securities on the ESG exclusion list",
            dec!(0),
            ValueUnit::Count,
            Severity::HardBreach,
        ),
        rule(
            "R004",
            "Issuer",
            "No direct holdings in Goldman Sachs affiliate securities",
            dec!(0),
            ValueUnit::Count,
            Severity::HardBreach,
        ),
        rule(
            "R005",
            "Cash",
            "Settled date cash must not exceed 10% of portfolio value",
            dec!(0.1),
            ValueUnit::Fraction,
            Severity::SoftBreach,
        ),
    ]
}

/// Display row of the rules table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleRow {
    /// Rule id.
    pub rule_id: String,
    /// Category.
    pub category: String,
    /// Rule text.
    pub description: String,
    /// Threshold formatted by unit, `N/A` when absent.
    pub threshold: String,
    /// Severity badge.
    pub severity: Badge,
}

impl RuleRow {
    /// Formats one rule.
    #[must_use]
    pub fn from_rule(rule: &ExtractedRule) -> Self {
        Self {
            rule_id: rule.id().to_string(),
            category: rule.category().to_string(),
            description: rule.description().to_string(),
            threshold: rule.threshold_display(),
            severity: rule.severity_or_unrecognized().badge(),
        }
    }
}

/// Searchable list of guideline rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RulesLibrary {
    rules: Vec<ExtractedRule>,
    ambiguous: Vec<Value>,
}

impl RulesLibrary {
    /// Library with the sample rules R001-R005.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(sample_rules())
    }

    /// Library over the given rules.
    #[must_use]
    pub fn new(rules: Vec<ExtractedRule>) -> Self {
        Self {
            rules,
            ambiguous: Vec::new(),
        }
    }

    /// Library from an extraction agent result.
    #[must_use]
    pub fn from_extraction(result: RuleExtractionResult) -> Self {
        if result.total_rules_extracted as usize != result.extracted_rules.len() {
            debug!(
                reported = result.total_rules_extracted,
                listed = result.extracted_rules.len(),
                "Extraction count differs from listed rules"
            );
        }
        Self {
            rules: result.extracted_rules,
            ambiguous: result.ambiguous_rules,
        }
    }

    /// Decodes an extraction result document.
    pub fn from_json(json: &str) -> GuidelineResult<Self> {
        Ok(Self::from_extraction(RuleExtractionResult::from_json(json)?))
    }

    /// Reads an extraction result document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> GuidelineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let library = Self::from_json(&text)?;
        info!(path = %path.display(), rules = library.len(), "Loaded rules library");
        Ok(library)
    }

    /// Every rule.
    #[must_use]
    pub fn rules(&self) -> &[ExtractedRule] {
        &self.rules
    }

    /// Rules the extraction agent could not interpret.
    #[must_use]
    pub fn ambiguous(&self) -> &[Value] {
        &self.ambiguous
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the library holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules whose description or category contains `search`, ignoring case.
    ///
    /// Missing descriptions or categories never match a non-empty search.
    #[must_use]
    pub fn filter(&self, search: &str) -> Vec<&ExtractedRule> {
        let needle = search.to_lowercase();
        let matches_field =
            |field: Option<&String>| field.is_some_and(|f| f.to_lowercase().contains(&needle));

        let visible: Vec<&ExtractedRule> = self
            .rules
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || matches_field(r.description.as_ref())
                    || matches_field(r.category.as_ref())
            })
            .collect();
        debug!(search, visible = visible.len(), total = self.rules.len(), "Filtered rules");
        visible
    }

    /// Count line under the search box, e.g. `Showing 2 of 5 rules`.
    #[must_use]
    pub fn count_label(&self, visible: usize) -> String {
        format!("Showing {visible} of {} rules", self.rules.len())
    }
}

/// Writes the header and one row per rule.
///
/// The threshold is written as the raw number (empty when absent) and the
/// severity as its wire name.
pub fn write_rules_csv<'a, W, I>(writer: W, rules: I) -> GuidelineResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ExtractedRule>,
{
    let mut csv = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(writer);

    csv.write_record(RULES_HEADER)?;
    for rule in rules {
        let threshold = rule
            .threshold
            .map(|t| t.normalize().to_string())
            .unwrap_or_default();
        let severity = rule.severity.map(|s| s.as_str()).unwrap_or_default();
        csv.write_record([
            rule.id(),
            rule.category(),
            rule.description(),
            threshold.as_str(),
            severity,
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Renders the rules export into a string.
pub fn rules_csv_string<'a, I>(rules: I) -> GuidelineResult<String>
where
    I: IntoIterator<Item = &'a ExtractedRule>,
{
    let mut buf = Vec::new();
    write_rules_csv(&mut buf, rules)?;
    String::from_utf8(buf).map_err(|e| GuidelineError::Csv(e.to_string()))
}
