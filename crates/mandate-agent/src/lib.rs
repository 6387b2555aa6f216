//! # Mandate Agent
//!
//! Client of the compliance agent service and the compliance-check flow
//! built on it.
//!
//! The service exposes two endpoints: `POST /upload` stores a guideline
//! document and returns asset ids, `POST /agent` runs one of four agents
//! against those assets. [`ComplianceCheckFlow`](flow::ComplianceCheckFlow)
//! chains the two with the coordinator agent and tracks progress.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mandate_agent::prelude::*;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AgentConfig::with_base_url("https://agents.example.com/api");
//! let client = HttpAgentClient::new(&config)?;
//!
//! let mut flow = ComplianceCheckFlow::new(client);
//! flow.select_file(GuidelineFile::from_path("guideline.pdf").await?);
//!
//! let response = flow.run(&CancellationToken::new()).await?;
//! println!("{}", response.status.as_str());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod agents;
pub mod client;
pub mod config;
pub mod error;
pub mod file;
pub mod flow;
pub mod http;
pub mod types;

pub use error::{AgentError, AgentResult, FlowError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::agents::{AgentId, COMPLIANCE_CHECK_INSTRUCTION};
    pub use crate::client::AgentClient;
    pub use crate::config::AgentConfig;
    pub use crate::error::{AgentError, AgentResult, FlowError};
    pub use crate::file::GuidelineFile;
    pub use crate::flow::{ComplianceCheckFlow, FlowPhase, FlowSnapshot};
    pub use crate::http::HttpAgentClient;
    pub use crate::types::{
        AgentReply, AgentRequest, NormalizedAgentResponse, ResponseStatus, UploadResponse,
    };
}
