//! Compliance-check flow: select a document, upload it, run the coordinator.
//!
//! ```text
//! Idle -> FileSelected -> Uploading (30) -> Processing (50) -> Success | Error (100)
//! ```
//!
//! A rejected upload or a cancelled run returns to `FileSelected` so the run
//! can be retried with the same document. Snapshots of the state are
//! published over a watch channel while [`ComplianceCheckFlow::run`] holds
//! the mutable borrow.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::agents::{AgentId, COMPLIANCE_CHECK_INSTRUCTION};
use crate::client::AgentClient;
use crate::error::{FlowError, CHECK_FAILED_MESSAGE, NO_FILE_MESSAGE, UPLOAD_FAILED_MESSAGE};
use crate::file::GuidelineFile;
use crate::types::{AgentRequest, NormalizedAgentResponse};

/// Progress once the upload has started.
pub const UPLOAD_PROGRESS: u8 = 30;
/// Progress once the coordinator has been invoked.
pub const PROCESSING_PROGRESS: u8 = 50;
/// Progress once the coordinator has answered.
pub const DONE_PROGRESS: u8 = 100;

/// Flow phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPhase {
    /// No document selected.
    Idle,
    /// A document is selected and no run is in flight.
    FileSelected,
    /// Uploading the document.
    Uploading,
    /// Waiting for the coordinator.
    Processing,
    /// The last run produced a result.
    Success,
    /// The last run failed.
    Error,
}

/// Observable state of the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowSnapshot {
    /// Current phase.
    pub phase: FlowPhase,
    /// Progress bar value, 0-100.
    pub progress: u8,
    /// Selected document name.
    pub file_name: Option<String>,
    /// Selected document size, e.g. `12.50 KB`.
    pub file_size: Option<String>,
    /// Message of the last failure.
    pub error: Option<String>,
}

impl FlowSnapshot {
    fn idle() -> Self {
        Self {
            phase: FlowPhase::Idle,
            progress: 0,
            file_name: None,
            file_size: None,
            error: None,
        }
    }

    /// True while a run is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        matches!(self.phase, FlowPhase::Uploading | FlowPhase::Processing)
    }

    /// Line under the progress bar while loading.
    #[must_use]
    pub fn progress_text(&self) -> Option<&'static str> {
        if !self.loading() {
            None
        } else if self.progress < PROCESSING_PROGRESS {
            Some("Uploading document...")
        } else {
            Some("Running compliance check...")
        }
    }
}

/// The agent tab's compliance-check flow.
pub struct ComplianceCheckFlow<C: AgentClient> {
    client: C,
    file: Option<GuidelineFile>,
    response: Option<NormalizedAgentResponse>,
    timeout: Option<Duration>,
    state: watch::Sender<FlowSnapshot>,
}

impl<C: AgentClient> ComplianceCheckFlow<C> {
    /// New idle flow over `client`.
    pub fn new(client: C) -> Self {
        let (state, _) = watch::channel(FlowSnapshot::idle());
        Self {
            client,
            file: None,
            response: None,
            timeout: None,
            state,
        }
    }

    /// Limits the duration of a whole run.
    #[must_use]
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Selects the document to check and clears any previous error.
    pub fn select_file(&mut self, file: GuidelineFile) {
        debug!(file = file.name(), size = file.size(), "Guideline selected");
        let snapshot = FlowSnapshot {
            phase: FlowPhase::FileSelected,
            progress: 0,
            file_name: Some(file.name().to_string()),
            file_size: Some(file.size_display()),
            error: None,
        };
        self.file = Some(file);
        self.state.send_replace(snapshot);
    }

    /// Selected document.
    #[must_use]
    pub fn file(&self) -> Option<&GuidelineFile> {
        self.file.as_ref()
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> FlowSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FlowSnapshot> {
        self.state.subscribe()
    }

    /// Result of the last successful run.
    #[must_use]
    pub fn response(&self) -> Option<&NormalizedAgentResponse> {
        self.response.as_ref()
    }

    /// True when a document is selected and no run is in flight.
    #[must_use]
    pub fn can_run(&self) -> bool {
        self.file.is_some() && !self.state.borrow().loading()
    }

    /// Uploads the selected document and runs the coordinator agent.
    ///
    /// Without a selected document this fails with
    /// [`FlowError::Validation`] before any network call. Upload rejection
    /// and cancellation return to `FileSelected`; every other failure ends
    /// in `Error`. The previous response is kept until a run succeeds.
    pub async fn run(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<NormalizedAgentResponse, FlowError> {
        let Some(file) = self.file.clone() else {
            let err = FlowError::Validation(NO_FILE_MESSAGE.to_string());
            self.state.send_modify(|s| s.error = Some(err.to_string()));
            return Err(err);
        };

        self.state.send_modify(|s| {
            s.error = None;
            s.progress = 0;
        });

        let outcome = self.bounded(cancel, self.check(&file)).await;

        match outcome {
            Ok(response) => {
                info!(file = file.name(), "Compliance check succeeded");
                self.response = Some(response.clone());
                self.transition(FlowPhase::Success, Some(DONE_PROGRESS), None);
                Ok(response)
            }
            Err(err) => {
                let phase = match err {
                    FlowError::Upload(_) | FlowError::Cancelled => FlowPhase::FileSelected,
                    _ => FlowPhase::Error,
                };
                warn!(file = file.name(), error = %err, ?phase, "Compliance check failed");
                self.transition(phase, None, Some(err.to_string()));
                Err(err)
            }
        }
    }

    async fn check(&self, file: &GuidelineFile) -> Result<NormalizedAgentResponse, FlowError> {
        self.transition(FlowPhase::Uploading, Some(UPLOAD_PROGRESS), None);
        let upload = self.client.upload(file).await?;
        if !upload.success {
            return Err(FlowError::Upload(
                upload
                    .error
                    .unwrap_or_else(|| UPLOAD_FAILED_MESSAGE.to_string()),
            ));
        }

        self.transition(FlowPhase::Processing, Some(PROCESSING_PROGRESS), None);
        let request = AgentRequest::new(
            AgentId::Coordinator,
            COMPLIANCE_CHECK_INSTRUCTION,
            upload.asset_ids,
        );
        let reply = self.client.invoke(&request).await?;
        self.state.send_modify(|s| s.progress = DONE_PROGRESS);

        if reply.success {
            Ok(reply.response)
        } else {
            Err(FlowError::Agent(
                reply
                    .error
                    .unwrap_or_else(|| CHECK_FAILED_MESSAGE.to_string()),
            ))
        }
    }

    /// Races `fut` against cancellation and the run time limit.
    async fn bounded<T, F>(&self, cancel: &CancellationToken, fut: F) -> Result<T, FlowError>
    where
        F: Future<Output = Result<T, FlowError>>,
    {
        let guarded = async {
            tokio::select! {
                () = cancel.cancelled() => Err(FlowError::Cancelled),
                res = fut => res,
            }
        };
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, guarded)
                .await
                .unwrap_or(Err(FlowError::TimedOut)),
            None => guarded.await,
        }
    }

    fn transition(&self, phase: FlowPhase, progress: Option<u8>, error: Option<String>) {
        self.state.send_modify(|s| {
            s.phase = phase;
            if let Some(progress) = progress {
                s.progress = progress;
            }
            s.error = error;
        });
    }
}

impl<C: AgentClient> std::fmt::Debug for ComplianceCheckFlow<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceCheckFlow")
            .field("file", &self.file.as_ref().map(GuidelineFile::name))
            .field("timeout", &self.timeout)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AgentError, AgentResult};
    use crate::types::{AgentReply, ResponseStatus, UploadResponse};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeClient {
        upload: UploadResponse,
        reply: Mutex<Option<AgentResult<AgentReply>>>,
        delay: Duration,
        uploads: AtomicUsize,
        invocations: AtomicUsize,
        seen_assets: Mutex<Vec<String>>,
    }

    impl FakeClient {
        fn new(upload: UploadResponse, reply: AgentResult<AgentReply>) -> Self {
            Self {
                upload,
                reply: Mutex::new(Some(reply)),
                delay: Duration::ZERO,
                uploads: AtomicUsize::new(0),
                invocations: AtomicUsize::new(0),
                seen_assets: Mutex::new(Vec::new()),
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl AgentClient for FakeClient {
        async fn upload(&self, _file: &GuidelineFile) -> AgentResult<UploadResponse> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            Ok(self.upload.clone())
        }

        async fn invoke(&self, request: &AgentRequest) -> AgentResult<AgentReply> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            self.seen_assets.lock().unwrap().clone_from(&request.assets);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(AgentError::config("reply already taken")))
        }
    }

    fn uploaded() -> UploadResponse {
        UploadResponse {
            success: true,
            asset_ids: vec!["asset-1".into()],
            error: None,
        }
    }

    fn succeeded() -> AgentResult<AgentReply> {
        Ok(AgentReply {
            success: true,
            response: NormalizedAgentResponse {
                status: ResponseStatus::Success,
                result: Some(json!({ "ok": true })),
                error: None,
            },
            error: None,
        })
    }

    fn pdf() -> GuidelineFile {
        GuidelineFile::new("guideline.pdf", vec![0; 2048])
    }

    #[tokio::test]
    async fn test_no_file_makes_no_calls() {
        let mut flow = ComplianceCheckFlow::new(FakeClient::new(uploaded(), succeeded()));
        assert!(!flow.can_run());

        let err = flow.run(&CancellationToken::new()).await.unwrap_err();
        assert_eq!(err, FlowError::Validation("Please upload a PDF file first".into()));
        assert_eq!(flow.client.uploads.load(Ordering::SeqCst), 0);
        assert_eq!(flow.client.invocations.load(Ordering::SeqCst), 0);
        assert_eq!(flow.snapshot().phase, FlowPhase::Idle);
        assert_eq!(flow.snapshot().error.as_deref(), Some(NO_FILE_MESSAGE));
    }

    #[tokio::test]
    async fn test_success_passes_asset_ids() {
        let mut flow = ComplianceCheckFlow::new(FakeClient::new(uploaded(), succeeded()));
        flow.select_file(pdf());
        assert!(flow.can_run());

        let response = flow.run(&CancellationToken::new()).await.unwrap();
        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(*flow.client.seen_assets.lock().unwrap(), vec!["asset-1".to_string()]);

        let snapshot = flow.snapshot();
        assert_eq!(snapshot.phase, FlowPhase::Success);
        assert_eq!(snapshot.progress, 100);
        assert_eq!(snapshot.file_size.as_deref(), Some("2.00 KB"));
        assert!(flow.response().is_some());
    }

    #[tokio::test]
    async fn test_upload_rejection_skips_agent() {
        let rejected = UploadResponse {
            success: false,
            asset_ids: vec![],
            error: None,
        };
        let mut flow = ComplianceCheckFlow::new(FakeClient::new(rejected, succeeded()));
        flow.select_file(pdf());

        let err = flow.run(&CancellationToken::new()).await.unwrap_err();
        assert_eq!(err, FlowError::Upload("File upload failed".into()));
        assert_eq!(flow.client.uploads.load(Ordering::SeqCst), 1);
        assert_eq!(flow.client.invocations.load(Ordering::SeqCst), 0);
        assert_eq!(flow.snapshot().phase, FlowPhase::FileSelected);
        assert!(flow.can_run());
    }

    #[tokio::test]
    async fn test_agent_failure_uses_message() {
        let failed = Ok(AgentReply {
            success: false,
            response: NormalizedAgentResponse {
                status: ResponseStatus::Error,
                result: None,
                error: Some("document unreadable".into()),
            },
            error: Some("document unreadable".into()),
        });
        let mut flow = ComplianceCheckFlow::new(FakeClient::new(uploaded(), failed));
        flow.select_file(pdf());

        let err = flow.run(&CancellationToken::new()).await.unwrap_err();
        assert_eq!(err, FlowError::Agent("document unreadable".into()));
        assert_eq!(flow.snapshot().phase, FlowPhase::Error);
        assert_eq!(flow.snapshot().progress, 100);
        assert!(flow.response().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_is_unexpected() {
        let broken = Err(AgentError::Api {
            endpoint: "http://svc/agent".into(),
            status: 500,
            body: "boom".into(),
        });
        let mut flow = ComplianceCheckFlow::new(FakeClient::new(uploaded(), broken));
        flow.select_file(pdf());

        let err = flow.run(&CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, FlowError::Unexpected(ref m) if m.contains("500")));
        assert_eq!(flow.snapshot().phase, FlowPhase::Error);
    }

    #[tokio::test]
    async fn test_selecting_again_clears_error() {
        let mut flow = ComplianceCheckFlow::new(FakeClient::new(uploaded(), succeeded()));
        flow.run(&CancellationToken::new()).await.unwrap_err();
        assert!(flow.snapshot().error.is_some());

        flow.select_file(pdf());
        assert_eq!(flow.snapshot().error, None);
        assert_eq!(flow.snapshot().phase, FlowPhase::FileSelected);
    }

    #[tokio::test]
    async fn test_cancel_returns_to_file_selected() {
        let client = FakeClient::new(uploaded(), succeeded()).slow(Duration::from_secs(60));
        let mut flow = ComplianceCheckFlow::new(client);
        flow.select_file(pdf());

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = flow.run(&cancel).await.unwrap_err();
        assert_eq!(err, FlowError::Cancelled);
        assert_eq!(flow.snapshot().phase, FlowPhase::FileSelected);
        assert!(flow.can_run());
    }

    #[tokio::test]
    async fn test_timeout_ends_in_error() {
        let client = FakeClient::new(uploaded(), succeeded()).slow(Duration::from_secs(60));
        let mut flow =
            ComplianceCheckFlow::new(client).with_timeout(Duration::from_millis(20));
        flow.select_file(pdf());

        let err = flow.run(&CancellationToken::new()).await.unwrap_err();
        assert_eq!(err, FlowError::TimedOut);
        assert_eq!(flow.snapshot().phase, FlowPhase::Error);
    }

    #[test]
    fn test_progress_text() {
        let mut snapshot = FlowSnapshot::idle();
        assert_eq!(snapshot.progress_text(), None);

        snapshot.phase = FlowPhase::Uploading;
        snapshot.progress = UPLOAD_PROGRESS;
        assert_eq!(snapshot.progress_text(), Some("Uploading document..."));

        snapshot.phase = FlowPhase::Processing;
        snapshot.progress = PROCESSING_PROGRESS;
        assert_eq!(snapshot.progress_text(), Some("Running compliance check..."));
    }
}
