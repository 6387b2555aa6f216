//! Sample dashboard shown before any compliance check has run.

use mandate_core::types::{
    BreachDetail, ComplianceDashboard, ComplianceSummary, ExtractedRulesSummary, OverallStatus,
    Priority, RemediationSummary, Severity, ValueUnit,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[allow(clippy::too_many_arguments)]
fn breach(
    breach_id: &str,
    severity: Severity,
    description: &str,
    current_value: Decimal,
    threshold_value: Decimal,
    excess_amount: Decimal,
    remediation_priority: Priority,
    action: &str,
    unit: ValueUnit,
) -> BreachDetail {
    BreachDetail {
        breach_id: breach_id.to_string(),
        severity,
        description: description.to_string(),
        current_value,
        threshold_value,
        excess_amount,
        remediation_priority,
        recommended_actions: vec![action.to_string()],
        unit: Some(unit),
    }
}

/// The sample result of checking portfolio `ABC` against its guideline.
#[must_use]
pub fn sample_dashboard() -> ComplianceDashboard {
    ComplianceDashboard {
        overall_status: OverallStatus::new(OverallStatus::BREACHES_DETECTED),
        compliance_score: dec!(85),
        summary: ComplianceSummary {
            total_rules_extracted: 13,
            total_rules_checked: 13,
            total_breaches: 5,
            hard_breaches: 2,
            soft_breaches: 3,
            remediation_actions_recommended: 5,
        },
        extracted_rules_summary: ExtractedRulesSummary {
            total_extracted: 13,
            ambiguous_rules_flagged: 3,
            confidence_score: dec!(0.8),
        },
        breach_details: vec![
            breach(
                "BR001",
                Severity::SoftBreach,
                "Total return underperformed the Custom Account Benchmark by 40 bps gross of fees per annum over the last full market cycle.",
                dec!(-0.4),
                dec!(0.6),
                dec!(-1.0),
                Priority::Medium,
                "Review and rebalance allocation relative to benchmark. Enhance research process and active positions.",
                ValueUnit::Percent,
            ),
            breach(
                "BR002",
                Severity::SoftBreach,
                "Long-term ex-ante tracking error exceeded 150 bps p.a. (actual: 170 bps).",
                dec!(1.7),
                dec!(1.5),
                dec!(0.2),
                Priority::High,
                "Reduce benchmark-divergent exposures. Increase core holdings alignment.",
                ValueUnit::Percent,
            ),
            breach(
                "BR003",
                Severity::HardBreach,
                "Position held in security present on the ESG exclusion list (ABC Corp 3.5% 2029, $700,000).",
                dec!(700000),
                dec!(0),
                dec!(700000),
                Priority::Immediate,
                "Sell ABC Corp 3.5% 2029 immediately. Patch ESG screening workflows.",
                ValueUnit::Currency,
            ),
            breach(
                "BR004",
                Severity::HardBreach,
                "Direct holding in a Goldman Sachs affiliate security (Goldman Sachs Group 2.625% 2031, $1,000,000).",
                dec!(1000000),
                dec!(0),
                dec!(1000000),
                Priority::Immediate,
                "Sell GS Group 2.625% 2031 position immediately. Strengthen issuer compliance checks.",
                ValueUnit::Currency,
            ),
            breach(
                "BR005",
                Severity::SoftBreach,
                "Settled date cash exceeds 10% of portfolio value (current: 12.3%).",
                dec!(0.123),
                dec!(0.1),
                dec!(0.023),
                Priority::High,
                "Swiftly reinvest excess cash to bring below 10%. Improve cash management controls.",
                ValueUnit::Fraction,
            ),
        ],
        remediation_summary: RemediationSummary {
            immediate_actions_required: 2,
            estimated_total_cost: dec!(18250),
            recommended_timeline: "1-7 business days depending on breach severity".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_agree_with_breaches() {
        let dashboard = sample_dashboard();
        assert_eq!(
            dashboard.breach_details.len() as u32,
            dashboard.summary.total_breaches
        );
        let immediate = dashboard
            .breach_details
            .iter()
            .filter(|b| b.remediation_priority == Priority::Immediate)
            .count() as u32;
        assert_eq!(immediate, dashboard.remediation_summary.immediate_actions_required);
    }
}
