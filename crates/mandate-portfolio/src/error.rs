//! Error types for portfolio operations.

use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur while loading, querying or exporting holdings.
#[derive(Error, Debug, Clone)]
pub enum PortfolioError {
    /// No portfolio with this id is loaded.
    #[error("Unknown portfolio: '{id}'")]
    UnknownPortfolio {
        /// The requested portfolio id.
        id: String,
    },

    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Invalid holding data.
    #[error("Invalid holding '{id}': {reason}")]
    InvalidHolding {
        /// The holding ID.
        id: String,
        /// The reason the holding is invalid.
        reason: String,
    },

    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(String),

    /// File access failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl PortfolioError {
    /// Create an unknown portfolio error.
    #[must_use]
    pub fn unknown_portfolio(id: impl Into<String>) -> Self {
        Self::UnknownPortfolio { id: id.into() }
    }

    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid holding error.
    #[must_use]
    pub fn invalid_holding(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for PortfolioError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<std::io::Error> for PortfolioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
