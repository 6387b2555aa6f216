//! Wire types of the agent service.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::agents::AgentId;

/// Response of `POST /upload`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Whether the upload was accepted.
    pub success: bool,
    /// Asset ids of the stored documents.
    #[serde(default)]
    pub asset_ids: Vec<String>,
    /// Failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /agent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRequest {
    /// Instruction for the agent.
    pub message: String,
    /// Service-side agent identifier.
    pub agent_id: String,
    /// Conversation id; fresh for every request.
    pub session_id: String,
    /// Uploaded asset ids the agent may read.
    #[serde(default)]
    pub assets: Vec<String>,
}

impl AgentRequest {
    /// Builds a request with a new random session id.
    #[must_use]
    pub fn new(agent: AgentId, message: impl Into<String>, assets: Vec<String>) -> Self {
        Self {
            message: message.into(),
            agent_id: agent.id().to_string(),
            session_id: Uuid::new_v4().to_string(),
            assets,
        }
    }
}

/// Agent response as sent by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAgentResponse {
    /// Whether the call succeeded.
    pub success: bool,
    /// Agent output.
    #[serde(default)]
    pub response: Option<AgentEnvelope>,
    /// Failure reason.
    #[serde(default)]
    pub error: Option<String>,
}

/// Agent output inside a [`RawAgentResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentEnvelope {
    /// Agent-reported status.
    #[serde(default)]
    pub status: String,
    /// Agent result payload.
    #[serde(default)]
    pub result: Option<Value>,
    /// Agent message, usually set on failure.
    #[serde(default)]
    pub message: Option<String>,
}

/// Status of a normalised response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The agent produced a result.
    Success,
    /// The agent failed.
    Error,
}

impl ResponseStatus {
    /// Wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Success => "success",
            ResponseStatus::Error => "error",
        }
    }
}

/// Agent response reduced to status, result and error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAgentResponse {
    /// Success or error.
    pub status: ResponseStatus,
    /// Result payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of an agent call as seen by the flow.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    /// Whether the call succeeded.
    pub success: bool,
    /// Normalised response.
    pub response: NormalizedAgentResponse,
    /// Failure reason.
    pub error: Option<String>,
}

impl AgentReply {
    /// Normalises a raw service response.
    ///
    /// The status is `error` when the call failed or the agent itself
    /// reported `error`; the error text prefers the agent's message.
    #[must_use]
    pub fn from_raw(raw: RawAgentResponse) -> Self {
        let envelope = raw.response.unwrap_or_default();
        let failed = !raw.success || envelope.status.eq_ignore_ascii_case("error");
        let error = envelope.message.or(raw.error);

        Self {
            success: !failed,
            response: NormalizedAgentResponse {
                status: if failed {
                    ResponseStatus::Error
                } else {
                    ResponseStatus::Success
                },
                result: envelope.result,
                error: if failed { error.clone() } else { None },
            },
            error: if failed { error } else { None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = AgentRequest::new(AgentId::Coordinator, "go", vec!["a1".into()]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["agent_id"], "6967c339f038ff7259fe2ace");
        assert_eq!(value["assets"], json!(["a1"]));
        assert!(Uuid::parse_str(&request.session_id).is_ok());

        let other = AgentRequest::new(AgentId::Coordinator, "go", vec![]);
        assert_ne!(request.session_id, other.session_id);
    }

    #[test]
    fn test_normalise_success() {
        let raw: RawAgentResponse = serde_json::from_value(json!({
            "success": true,
            "response": { "status": "success", "result": { "ok": 1 } }
        }))
        .unwrap();
        let reply = AgentReply::from_raw(raw);
        assert!(reply.success);
        assert_eq!(reply.response.status, ResponseStatus::Success);
        assert_eq!(reply.response.result, Some(json!({ "ok": 1 })));
        assert_eq!(reply.error, None);
    }

    #[test]
    fn test_normalise_failures() {
        let reply = AgentReply::from_raw(RawAgentResponse {
            success: false,
            response: None,
            error: Some("agent offline".into()),
        });
        assert!(!reply.success);
        assert_eq!(reply.error.as_deref(), Some("agent offline"));

        let raw: RawAgentResponse = serde_json::from_value(json!({
            "success": true,
            "response": { "status": "error", "message": "document unreadable" }
        }))
        .unwrap();
        let reply = AgentReply::from_raw(raw);
        assert!(!reply.success);
        assert_eq!(reply.response.status, ResponseStatus::Error);
        assert_eq!(reply.error.as_deref(), Some("document unreadable"));
    }
}
