//! Text extraction: turns an uploaded file into plain text for analysis.
//!
//! The format is picked from the filename extension. Each `DocumentFormat`
//! variant knows how to read its own bytes; adding a format means adding a
//! variant here and never touches the analysis code.

mod docx;
mod pdf;

use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    #[error("failed to parse DOCX: {0}")]
    Docx(String),

    #[error("text extraction timed out")]
    TimedOut,

    #[error("text extraction aborted: {0}")]
    Aborted(String),
}

/// A file as received from the client. Lives for one request only.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Case-insensitive extension match. Anything unrecognized is read as text.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            DocumentFormat::Pdf
        } else if lower.ends_with(".docx") {
            DocumentFormat::Docx
        } else {
            DocumentFormat::PlainText
        }
    }

    pub fn extract(self, bytes: &[u8]) -> Result<String, ExtractionError> {
        match self {
            DocumentFormat::Pdf => pdf::extract_pages(bytes),
            DocumentFormat::Docx => docx::extract_paragraphs(bytes),
            DocumentFormat::PlainText => Ok(decode_lossy(bytes)),
        }
    }
}

/// Extracts text from an upload on the blocking pool.
/// PDF and DOCX parsing is CPU-bound and must not stall the async workers.
pub async fn extract_text(document: UploadedDocument) -> Result<String, ExtractionError> {
    let format = DocumentFormat::from_filename(&document.filename);
    debug!(
        filename = %document.filename,
        bytes = document.bytes.len(),
        ?format,
        "Extracting text"
    );

    let bytes = document.bytes;
    tokio::time::timeout(
        EXTRACTION_TIMEOUT,
        tokio::task::spawn_blocking(move || format.extract(&bytes)),
    )
    .await
    .map_err(|_| ExtractionError::TimedOut)?
    .map_err(|e| ExtractionError::Aborted(e.to_string()))?
}

/// UTF-8 decode that drops invalid sequences instead of failing.
fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
