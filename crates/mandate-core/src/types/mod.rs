//! Core domain types.

mod compliance;
mod rule;
mod unit;

pub use compliance::{
    BreachDetail, ComplianceDashboard, ComplianceSummary, CoordinatorResult,
    ExtractedRulesSummary, OverallStatus, Priority, RemediationSummary, Severity,
    WorkflowExecution,
};
pub use rule::{ExtractedRule, RuleExtractionResult};
pub use unit::ValueUnit;
