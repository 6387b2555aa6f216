//! Agent service seam.

use async_trait::async_trait;

use crate::error::AgentResult;
use crate::file::GuidelineFile;
use crate::types::{AgentReply, AgentRequest, UploadResponse};

/// Client of the agent service.
///
/// The compliance-check flow only talks to the service through this trait,
/// so tests can drive it with an in-memory fake.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Uploads a guideline document.
    ///
    /// A rejected upload is `Ok` with `success == false`; `Err` is reserved
    /// for transport, status and decoding failures.
    async fn upload(&self, file: &GuidelineFile) -> AgentResult<UploadResponse>;

    /// Invokes an agent and normalises its response.
    async fn invoke(&self, request: &AgentRequest) -> AgentResult<AgentReply>;
}

#[async_trait]
impl<C: AgentClient + ?Sized> AgentClient for std::sync::Arc<C> {
    async fn upload(&self, file: &GuidelineFile) -> AgentResult<UploadResponse> {
        (**self).upload(file).await
    }

    async fn invoke(&self, request: &AgentRequest) -> AgentResult<AgentReply> {
        (**self).invoke(request).await
    }
}
