//! Error types for core parsing and decoding.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while interpreting core values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A textual value did not match any member of a closed enumeration.
    #[error("Unknown {kind}: '{value}'")]
    UnknownValue {
        /// The enumeration being parsed (e.g. "severity").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A compliance payload could not be decoded.
    #[error("Invalid compliance payload: {reason}")]
    InvalidPayload {
        /// Decoder message.
        reason: String,
    },
}

impl CoreError {
    /// Create an unknown value error.
    #[must_use]
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            kind,
            value: value.into(),
        }
    }

    /// Create an invalid payload error.
    #[must_use]
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_payload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::unknown("severity", "catastrophic");
        assert_eq!(err.to_string(), "Unknown severity: 'catastrophic'");

        let err = CoreError::invalid_payload("missing field `summary`");
        assert!(err.to_string().contains("summary"));
    }
}
