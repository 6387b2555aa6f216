//! Error types for the rules library and version comparison.

use thiserror::Error;

/// Result type for guideline operations.
pub type GuidelineResult<T> = Result<T, GuidelineError>;

/// Which side of a comparison a selection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Version A.
    A,
    /// Version B.
    B,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => f.write_str("Version A"),
            Side::B => f.write_str("Version B"),
        }
    }
}

/// Errors from the guideline views.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuidelineError {
    /// A comparison side has no version selected.
    #[error("{side} is not selected")]
    MissingSelection {
        /// The empty side.
        side: Side,
    },

    /// Both sides name the same version.
    #[error("Cannot compare '{version}' with itself")]
    IdenticalVersions {
        /// The selected version.
        version: String,
    },

    /// The version label is not one of the known guideline versions.
    #[error("Unknown guideline version: '{version}'")]
    UnknownVersion {
        /// The requested label.
        version: String,
    },

    /// The comparison was cancelled before it finished.
    #[error("Comparison cancelled")]
    Cancelled,

    /// Rules document could not be decoded.
    #[error("Invalid rules document: {0}")]
    Json(String),

    /// CSV writing failed.
    #[error("CSV error: {0}")]
    Csv(String),

    /// File access failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl GuidelineError {
    /// Create a missing selection error.
    #[must_use]
    pub fn missing_selection(side: Side) -> Self {
        Self::MissingSelection { side }
    }

    /// Create an unknown version error.
    #[must_use]
    pub fn unknown_version(version: impl Into<String>) -> Self {
        Self::UnknownVersion {
            version: version.into(),
        }
    }
}

impl From<serde_json::Error> for GuidelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<mandate_core::CoreError> for GuidelineError {
    fn from(err: mandate_core::CoreError) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for GuidelineError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<std::io::Error> for GuidelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
