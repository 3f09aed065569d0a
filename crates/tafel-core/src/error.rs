use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TafelError {
    #[error("invalid page specification '{spec}': {reason}")]
    PageFormat { spec: String, reason: String },

    #[error("extraction failed on page {page}: {reason}")]
    Extraction { page: String, reason: String },

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("no tables found on the requested pages")]
    NoTables,

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("failed to write workbook {path}: {reason}")]
    WorkbookWrite { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TafelError {
    pub(crate) fn page_format(spec: &str, reason: impl Into<String>) -> Self {
        TafelError::PageFormat {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn extraction(page: &str, reason: impl Into<String>) -> Self {
        TafelError::Extraction {
            page: page.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures raised while reading tables out of the PDF.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            TafelError::Extraction { .. }
                | TafelError::PdftotextNotFound
                | TafelError::PdftotextFailed { .. }
        )
    }
}
