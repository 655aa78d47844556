use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Closed set of formats the extractor knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Classifies a path by extension, ignoring ASCII case, so `CV.PDF` and
    /// `cv.pdf` both read as PDF. Unknown or missing extensions read as plain text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => Self::Pdf,
            Some(ext) if ext.eq_ignore_ascii_case("docx") => Self::Docx,
            _ => Self::PlainText,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::PlainText => "plain-text",
        }
    }
}

/// A candidate document, referenced only by path for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub path: PathBuf,
    pub display_name: String,
}

impl DocumentRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, display_name }
    }

    pub fn format(&self) -> DocumentFormat {
        DocumentFormat::from_path(&self.path)
    }
}
