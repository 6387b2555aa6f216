//! Error types for dashboard loading.

use thiserror::Error;

/// Result type for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Errors that can occur while decoding a dashboard payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// The payload is not a dashboard or a coordinator result.
    #[error("Invalid dashboard payload: {reason}")]
    Decode {
        /// Decoder message.
        reason: String,
    },
}

impl DashboardError {
    /// Create a decode error.
    #[must_use]
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<mandate_core::CoreError> for DashboardError {
    fn from(err: mandate_core::CoreError) -> Self {
        Self::decode(err.to_string())
    }
}
