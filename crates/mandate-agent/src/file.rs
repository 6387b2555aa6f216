//! Guideline documents selected for upload.

use std::path::Path;

use tracing::warn;

use crate::error::{AgentError, AgentResult};

/// MIME type sent for PDF documents.
pub const PDF_MIME: &str = "application/pdf";

/// A document held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidelineFile {
    name: String,
    bytes: Vec<u8>,
}

impl GuidelineFile {
    /// Wraps an in-memory document.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file = Self {
            name: name.into(),
            bytes,
        };
        if !file.is_pdf() {
            warn!(file = %file.name, "Selected guideline is not a PDF");
        }
        file
    }

    /// Reads a document from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> AgentResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| AgentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    /// File name without directories.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw content.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// True when the name ends in `.pdf`, ignoring case.
    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.name.to_lowercase().ends_with(".pdf")
    }

    /// MIME type to send with the upload.
    #[must_use]
    pub fn mime(&self) -> &'static str {
        if self.is_pdf() {
            PDF_MIME
        } else {
            "application/octet-stream"
        }
    }

    /// Size in kilobytes with two decimals, e.g. `12.50 KB`.
    #[must_use]
    pub fn size_display(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let kb = self.bytes.len() as f64 / 1024.0;
        format!("{kb:.2} KB")
    }
}
