//! reqwest implementation of [`AgentClient`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::client::AgentClient;
use crate::config::AgentConfig;
use crate::error::{AgentError, AgentResult};
use crate::file::GuidelineFile;
use crate::types::{AgentReply, AgentRequest, RawAgentResponse, UploadResponse};

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "files";

/// HTTP client of the agent service.
#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAgentClient {
    /// Builds a client from configuration.
    ///
    /// The API key, when present, is sent as a bearer token on every request.
    pub fn new(config: &AgentConfig) -> AgentResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        if let Some(key) = config.api_key.as_deref() {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| AgentError::config("invalid API key characters"))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| AgentError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Sends a request and decodes a 2xx JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> AgentResult<T> {
        let resp = request
            .send()
            .await
            .map_err(|e| AgentError::transport(endpoint, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(endpoint, status = status.as_u16(), "Agent service returned an error status");
            return Err(AgentError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<T>().await.map_err(|source| {
            if source.is_timeout() {
                AgentError::TimedOut {
                    endpoint: endpoint.to_string(),
                }
            } else {
                AgentError::Deserialization {
                    endpoint: endpoint.to_string(),
                    source,
                }
            }
        })
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn upload(&self, file: &GuidelineFile) -> AgentResult<UploadResponse> {
        let endpoint = self.endpoint("upload");
        info!(file = file.name(), size = file.size(), "Uploading guideline document");

        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime())
            .map_err(|e| AgentError::transport(&endpoint, e))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response: UploadResponse = self
            .send_json(self.client.post(&endpoint).multipart(form), &endpoint)
            .await?;
        debug!(
            success = response.success,
            assets = response.asset_ids.len(),
            "Upload finished"
        );
        Ok(response)
    }

    async fn invoke(&self, request: &AgentRequest) -> AgentResult<AgentReply> {
        let endpoint = self.endpoint("agent");
        info!(
            agent_id = %request.agent_id,
            session_id = %request.session_id,
            assets = request.assets.len(),
            "Invoking agent"
        );

        let raw: RawAgentResponse = self
            .send_json(self.client.post(&endpoint).json(request), &endpoint)
            .await?;
        let reply = AgentReply::from_raw(raw);
        debug!(success = reply.success, "Agent call finished");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_ignore_trailing_slash() {
        let client = HttpAgentClient::new(&AgentConfig::with_base_url("http://svc/api/")).unwrap();
        assert_eq!(client.base_url(), "http://svc/api");
        assert_eq!(client.endpoint("upload"), "http://svc/api/upload");
    }

    #[test]
    fn test_rejects_invalid_key() {
        let config = AgentConfig {
            api_key: Some("bad\nkey".into()),
            ..AgentConfig::default()
        };
        assert!(matches!(HttpAgentClient::new(&config), Err(AgentError::Config(_))));
    }
}
