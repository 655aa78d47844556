//! Format-specific text extraction.
//!
//! Each format implements [`TextExtractor`]; [`ContentExtractor`] picks the
//! implementation from the path's [`DocumentFormat`]. Text is re-read on
//! every call, nothing is cached.

mod docx;
mod pdf;
mod text;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

use super::document::DocumentFormat;
use std::path::{Path, PathBuf};

/// Separator placed between pages or paragraphs.
pub(crate) const UNIT_SEPARATOR: &str = " ";

/// Converts a document on disk into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Dispatches to the extractor matching the path's extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentExtractor;

impl ContentExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for ContentExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        match DocumentFormat::from_path(path) {
            DocumentFormat::Pdf => PdfExtractor.extract(path),
            DocumentFormat::Docx => DocxExtractor.extract(path),
            DocumentFormat::PlainText => PlainTextExtractor.extract(path),
        }
    }
}

/// Raised when a document cannot be opened or decoded.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid PDF: {detail}")]
    Pdf { detail: String },
    #[error("invalid DOCX: {detail}")]
    Docx { detail: String },
    #[error("{path} is not valid UTF-8: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>, ExtractionError> {
    std::fs::read(path).map_err(|source| ExtractionError::Io {
        path: path.to_path_buf(),
        source,
    })
}
