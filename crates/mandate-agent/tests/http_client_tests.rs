//! Contract tests for HttpAgentClient against a mock agent service.
//!
//! | Method | Path      | Test                 |
//! |--------|-----------|----------------------|
//! | POST   | `/upload` | `upload_*`           |
//! | POST   | `/agent`  | `invoke_*`           |

use std::time::Duration;

use mandate_agent::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, api_key: Option<&str>) -> HttpAgentClient {
    let config = AgentConfig {
        api_base_url: format!("{}/api/", server.uri()),
        api_key: api_key.map(str::to_string),
        request_timeout_secs: 1,
        check_timeout_secs: None,
    };
    HttpAgentClient::new(&config).unwrap()
}

fn guideline() -> GuidelineFile {
    GuidelineFile::new("guideline.pdf", b"%PDF-1.7 sample".to_vec())
}

// ── POST /upload ─────────────────────────────────────────────────────

#[tokio::test]
async fn upload_sends_multipart_files_field_with_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(header("authorization", "Bearer secret-key"))
        .and(body_string_contains("name=\"files\""))
        .and(body_string_contains("filename=\"guideline.pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "asset_ids": ["asset-1", "asset-2"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server, Some("secret-key"))
        .upload(&guideline())
        .await
        .unwrap();
    assert!(response.success);
    assert_eq!(response.asset_ids, vec!["asset-1", "asset-2"]);
}

#[tokio::test]
async fn upload_rejection_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Unsupported file type"
        })))
        .mount(&server)
        .await;

    let response = client_for(&server, None).upload(&guideline()).await.unwrap();
    assert!(!response.success);
    assert!(response.asset_ids.is_empty());
    assert_eq!(response.error.as_deref(), Some("Unsupported file type"));
}

#[tokio::test]
async fn upload_server_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server, None).upload(&guideline()).await.unwrap_err();
    match err {
        AgentError::Api { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

// ── POST /agent ──────────────────────────────────────────────────────

#[tokio::test]
async fn invoke_sends_request_body_and_normalises_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/agent"))
        .and(body_partial_json(json!({
            "agent_id": "6967c339f038ff7259fe2ace",
            "assets": ["asset-1"],
            "message": COMPLIANCE_CHECK_INSTRUCTION
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": { "status": "success", "result": { "rules": 5 } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = AgentRequest::new(
        AgentId::Coordinator,
        COMPLIANCE_CHECK_INSTRUCTION,
        vec!["asset-1".into()],
    );
    let reply = client_for(&server, None).invoke(&request).await.unwrap();
    assert!(reply.success);
    assert_eq!(reply.response.status, ResponseStatus::Success);
    assert_eq!(reply.response.result, Some(json!({ "rules": 5 })));
}

#[tokio::test]
async fn invoke_failure_envelope_keeps_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Agent quota exhausted"
        })))
        .mount(&server)
        .await;

    let request = AgentRequest::new(AgentId::RuleExtraction, "extract", vec![]);
    let reply = client_for(&server, None).invoke(&request).await.unwrap();
    assert!(!reply.success);
    assert_eq!(reply.response.status, ResponseStatus::Error);
    assert_eq!(reply.error.as_deref(), Some("Agent quota exhausted"));
}

#[tokio::test]
async fn invoke_malformed_body_maps_to_deserialization() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let request = AgentRequest::new(AgentId::Coordinator, "go", vec![]);
    let err = client_for(&server, None).invoke(&request).await.unwrap_err();
    assert!(matches!(err, AgentError::Deserialization { .. }));
}

#[tokio::test]
async fn invoke_slow_service_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/agent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let request = AgentRequest::new(AgentId::Coordinator, "go", vec![]);
    let err = client_for(&server, None).invoke(&request).await.unwrap_err();
    assert!(matches!(err, AgentError::TimedOut { .. }), "got {err:?}");
}
