//! Error types for the agent client and the compliance-check flow.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for agent client operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors from the agent service client.
#[derive(Error, Debug)]
pub enum AgentError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Request URL.
        endpoint: String,
        /// Underlying error.
        source: reqwest::Error,
    },

    /// The service returned a non-2xx status.
    #[error("Agent service {endpoint} returned {status}: {body}")]
    Api {
        /// Request URL.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Response body was not the expected JSON envelope.
    #[error("Failed to decode response from {endpoint}: {source}")]
    Deserialization {
        /// Request URL.
        endpoint: String,
        /// Underlying error.
        source: reqwest::Error,
    },

    /// The request exceeded its timeout.
    #[error("Request to {endpoint} timed out")]
    TimedOut {
        /// Request URL.
        endpoint: String,
    },

    /// Reading a local file failed.
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AgentError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }

    /// Classifies a reqwest error raised while sending to `endpoint`.
    #[must_use]
    pub fn transport(endpoint: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::TimedOut {
                endpoint: endpoint.to_string(),
            }
        } else {
            Self::Http {
                endpoint: endpoint.to_string(),
                source,
            }
        }
    }
}

/// Message shown when no file has been selected.
pub const NO_FILE_MESSAGE: &str = "Please upload a PDF file first";
/// Fallback message for a failed upload.
pub const UPLOAD_FAILED_MESSAGE: &str = "File upload failed";
/// Fallback message for a failed agent call.
pub const CHECK_FAILED_MESSAGE: &str = "Compliance check failed";
/// Fallback message for unexpected faults.
pub const UNEXPECTED_MESSAGE: &str = "An error occurred";

/// Why a compliance-check run ended without a result.
///
/// Every kind ends the current run only; the selected file is kept so the
/// run can be retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The run was started without a file.
    #[error("{0}")]
    Validation(String),

    /// The service rejected the upload.
    #[error("{0}")]
    Upload(String),

    /// The coordinator agent reported failure.
    #[error("{0}")]
    Agent(String),

    /// Transport, status or decoding failure.
    #[error("{0}")]
    Unexpected(String),

    /// The run exceeded its time limit.
    #[error("Compliance check timed out")]
    TimedOut,

    /// The caller cancelled the run.
    #[error("Compliance check cancelled")]
    Cancelled,
}

impl From<AgentError> for FlowError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::TimedOut { .. } => FlowError::TimedOut,
            other => {
                let message = other.to_string();
                if message.is_empty() {
                    FlowError::Unexpected(UNEXPECTED_MESSAGE.to_string())
                } else {
                    FlowError::Unexpected(message)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = AgentError::Api {
            endpoint: "http://svc/upload".into(),
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(
            err.to_string(),
            "Agent service http://svc/upload returned 502: bad gateway"
        );
    }

    #[test]
    fn test_flow_error_mapping() {
        let timed_out = AgentError::TimedOut {
            endpoint: "http://svc/agent".into(),
        };
        assert_eq!(FlowError::from(timed_out), FlowError::TimedOut);

        let config = AgentError::config("missing base url");
        assert_eq!(
            FlowError::from(config),
            FlowError::Unexpected("Configuration error: missing base url".into())
        );
    }

    #[test]
    fn test_flow_error_messages_are_verbatim() {
        let err = FlowError::Upload("quota exceeded".into());
        assert_eq!(err.to_string(), "quota exceeded");
        assert_eq!(
            FlowError::Validation(NO_FILE_MESSAGE.into()).to_string(),
            "Please upload a PDF file first"
        );
    }
}
