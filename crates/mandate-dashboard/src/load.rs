//! Decoding dashboards from JSON documents.

use mandate_core::types::{ComplianceDashboard, CoordinatorResult};
use serde_json::Value;

use crate::error::{DashboardError, DashboardResult};

/// Decodes a dashboard from JSON text.
///
/// Accepts either a bare dashboard or a coordinator result wrapping one under
/// `compliance_dashboard`.
pub fn parse_dashboard(json: &str) -> DashboardResult<ComplianceDashboard> {
    let value: Value = serde_json::from_str(json)?;
    if value.get("compliance_dashboard").is_some() {
        return Ok(CoordinatorResult::from_value(value)?.compliance_dashboard);
    }
    if value.get("overall_status").is_none() {
        return Err(DashboardError::decode(
            "expected a compliance dashboard or a coordinator result",
        ));
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_dashboard;
    use serde_json::json;

    #[test]
    fn test_bare_and_wrapped() {
        let dashboard = sample_dashboard();
        let bare = serde_json::to_string(&dashboard).unwrap();
        assert_eq!(parse_dashboard(&bare).unwrap(), dashboard);

        let wrapped = json!({
            "compliance_dashboard": dashboard,
            "workflow_execution": { "rule_extraction_completed": true }
        })
        .to_string();
        assert_eq!(parse_dashboard(&wrapped).unwrap().compliance_score, dashboard.compliance_score);
    }

    #[test]
    fn test_rejects_other_documents() {
        assert!(matches!(
            parse_dashboard("{\"rules\": []}"),
            Err(DashboardError::Decode { .. })
        ));
        assert!(parse_dashboard("not json").is_err());
    }
}
