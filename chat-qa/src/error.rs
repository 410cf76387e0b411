//! Typed error for the chat-qa crate.
//!
//! Every failure here is fatal to the current question: nothing retries,
//! nothing degrades, the error propagates to the interaction handler.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaError {
    /// Document loading, embedding, or index failures.
    #[error("index error: {0}")]
    Index(#[from] doc_index::IndexError),

    /// Hosted model construction or generation failures.
    #[error("llm error: {0}")]
    Llm(#[from] llm_service::LlmError),

    /// No backend was selected for this session.
    #[error("no language-model backend selected")]
    BackendUnselected,

    /// The free tier is declared but has no implementation.
    #[error("the free-tier backend is not implemented")]
    FreeBackendUnavailable,

    /// The pipeline was expected to be built but is not.
    #[error("retrieval pipeline not initialized")]
    NotInitialized,
}
