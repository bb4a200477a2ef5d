//! Document Export Service Port - Serializes a rendered proposal.
//!
//! Export always starts from the same [`RenderedDocument`] the preview shows.
//! There is deliberately no method taking a record: an export-only rendering
//! path could drift from what the user saw.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::domain::proposal::RenderedDocument;

/// Port for exporting rendered proposals to files.
///
/// # Usage
///
/// ```rust,ignore
/// let export_service: &dyn DocumentExportService = get_service();
/// let doc = session.preview();
///
/// let html = export_service.to_html(&doc);
/// let pdf = export_service.to_pdf(&doc).await?;
/// ```
#[async_trait]
pub trait DocumentExportService: Send + Sync {
    /// Serialize the document to Markdown.
    fn to_markdown(&self, document: &RenderedDocument) -> String;

    /// Serialize the document to a complete, print-ready HTML page.
    fn to_html(&self, document: &RenderedDocument) -> String;

    /// Convert the document to PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the external converter is missing or fails.
    async fn to_pdf(&self, document: &RenderedDocument) -> Result<Vec<u8>, ExportError>;

    /// Export the document in the requested format.
    async fn export(
        &self,
        document: &RenderedDocument,
        format: ExportFormat,
        base_filename: &str,
    ) -> Result<ExportedDocument, ExportError> {
        let content = match format {
            ExportFormat::Markdown => self.to_markdown(document).into_bytes(),
            ExportFormat::Html => self.to_html(document).into_bytes(),
            ExportFormat::Pdf => self.to_pdf(document).await?,
        };
        Ok(ExportedDocument::new(content, format, base_filename))
    }
}

/// Export formats supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Markdown,
    Pdf,
    Html,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Html => write!(f, "html"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "pdf" => Ok(ExportFormat::Pdf),
            "html" | "htm" => Ok(ExportFormat::Html),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Exported document with content and metadata.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// The exported content as bytes.
    pub content: Vec<u8>,
    /// Suggested filename.
    pub filename: String,
    /// The format that was used.
    pub format: ExportFormat,
    /// Hex SHA-256 of `content`.
    pub checksum: String,
}

impl ExportedDocument {
    /// Create a new exported document, computing its checksum.
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        let checksum = format!("{:x}", Sha256::digest(&content));
        Self {
            content,
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
            checksum,
        }
    }

    /// Content size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Unsupported export format requested.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// External converter (e.g., the PDF engine) is not available.
    #[error("Export service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Conversion to PDF failed.
    #[error("PDF conversion failed: {0}")]
    PdfConversionFailed(String),

    /// Timeout during conversion.
    #[error("Conversion timed out after {0} seconds")]
    Timeout(u64),

    /// I/O error during export.
    #[error("I/O error during export: {0}")]
    IoError(String),
}

impl ExportError {
    /// Create a service unavailable error.
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    /// Create a PDF conversion error.
    pub fn pdf_failed(reason: impl Into<String>) -> Self {
        Self::PdfConversionFailed(reason.into())
    }

    /// Create an I/O error.
    pub fn io_error(reason: impl Into<String>) -> Self {
        Self::IoError(reason.into())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
