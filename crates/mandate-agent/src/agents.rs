//! Agents hosted by the compliance service.

use std::fmt;
use std::str::FromStr;

use mandate_core::CoreError;
use serde::{Deserialize, Serialize};

/// Instruction sent to the coordinator for a full compliance check.
pub const COMPLIANCE_CHECK_INSTRUCTION: &str = "Run a complete compliance check for the uploaded investment guideline document. Extract rules, validate portfolio holdings, and provide remediation recommendations.";

/// An agent of the compliance workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentId {
    /// Orchestrates the other three and returns the dashboard.
    Coordinator,
    /// Extracts rules from a guideline document.
    RuleExtraction,
    /// Checks holdings against extracted rules.
    ComplianceChecker,
    /// Proposes remediation for breaches.
    RemediationAnalyst,
}

impl AgentId {
    /// All agents.
    pub const ALL: [AgentId; 4] = [
        AgentId::Coordinator,
        AgentId::RuleExtraction,
        AgentId::ComplianceChecker,
        AgentId::RemediationAnalyst,
    ];

    /// Service-side identifier.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            AgentId::Coordinator => "6967c339f038ff7259fe2ace",
            AgentId::RuleExtraction => "6967c2d5f038ff7259fe2ac5",
            AgentId::ComplianceChecker => "6967c2edf038ff7259fe2ac6",
            AgentId::RemediationAnalyst => "6967c30af038ff7259fe2aca",
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            AgentId::Coordinator => "Compliance Coordinator",
            AgentId::RuleExtraction => "Rule Extraction",
            AgentId::ComplianceChecker => "Compliance Checker",
            AgentId::RemediationAnalyst => "Remediation Analyst",
        }
    }

    /// Looks up an agent by its service-side identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(agent) = Self::from_id(s.trim()) {
            return Ok(agent);
        }
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "coordinator" | "compliance_coordinator" => Ok(AgentId::Coordinator),
            "rule_extraction" | "extraction" => Ok(AgentId::RuleExtraction),
            "compliance_checker" | "checker" => Ok(AgentId::ComplianceChecker),
            "remediation_analyst" | "remediation" => Ok(AgentId::RemediationAnalyst),
            _ => Err(CoreError::unknown("agent", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_and_round_trip() {
        for agent in AgentId::ALL {
            assert_eq!(AgentId::from_id(agent.id()), Some(agent));
            assert_eq!(agent.id().parse::<AgentId>().unwrap(), agent);
        }
        assert_eq!(AgentId::Coordinator.id(), "6967c339f038ff7259fe2ace");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("remediation-analyst".parse::<AgentId>().unwrap(), AgentId::RemediationAnalyst);
        assert_eq!("Coordinator".parse::<AgentId>().unwrap(), AgentId::Coordinator);
        assert!("auditor".parse::<AgentId>().is_err());
    }
}
