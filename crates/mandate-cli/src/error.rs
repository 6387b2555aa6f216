//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// An argument value could not be interpreted.
    #[error("Invalid {name}: {value}. {hint}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Value given.
        value: String,
        /// What would be accepted.
        hint: String,
    },

    /// Unknown configuration key.
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Create an invalid-argument error.
    pub fn invalid(name: &'static str, value: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            value: value.into(),
            hint: hint.into(),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
