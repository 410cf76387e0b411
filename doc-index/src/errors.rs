//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for doc-index operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing / serialization errors.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The PDF could not be opened or parsed.
    #[error("failed to load pdf: {0}")]
    PdfLoad(String),

    /// A page's text could not be extracted.
    #[error("failed to extract text: {0}")]
    PdfExtract(String),

    /// The document yielded no non-blank pages.
    #[error("document has no extractable text")]
    EmptyDocument,

    /// Mismatch in vector dimensionality across records.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Embedding backend failure (wrapped).
    #[error("embedding failed: {0}")]
    Embed(String),
}
