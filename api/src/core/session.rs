//! Explicit session objects.
//!
//! A session carries everything one client interaction needs: the tier
//! choice, the credential, the saved document path, the full display
//! history, and the cached orchestrator instance.

use std::path::PathBuf;

use chat_qa::{BackendChoice, DocumentQa, QaTurn};
use doc_index::IndexConfig;
use tracing::debug;

use crate::error_handler::AppError;

pub struct Session {
    pub backend: BackendChoice,
    pub credential: String,
    pub document: Option<PathBuf>,
    /// Every `(question, answer)` pair, for display. The orchestrator
    /// itself retains only the most recent turn.
    pub turns: Vec<QaTurn>,
    qa: Option<DocumentQa>,
}

impl Session {
    pub fn new(backend: BackendChoice, credential: String) -> Self {
        Self {
            backend,
            credential,
            document: None,
            turns: Vec::new(),
            qa: None,
        }
    }

    /// Attaches a freshly saved document, replacing any previous
    /// orchestrator. The stale index is removed on the next question's
    /// initialization.
    pub fn attach_document(&mut self, path: PathBuf, index_cfg: IndexConfig) {
        self.qa = Some(DocumentQa::new(
            self.backend,
            self.credential.clone(),
            path.clone(),
            index_cfg,
        ));
        self.document = Some(path);
    }

    /// Routes one question through the session's orchestrator.
    ///
    /// An empty or whitespace question yields `""` without invoking the
    /// orchestrator at all; a non-empty question requires an uploaded
    /// document.
    ///
    /// # Errors
    /// [`AppError::NoDocument`] without an upload; orchestrator failures
    /// propagate unchanged.
    pub async fn ask(&mut self, question: &str) -> Result<String, AppError> {
        if question.trim().is_empty() {
            debug!("empty question, skipping orchestrator");
            return Ok(String::new());
        }

        let qa = self.qa.as_mut().ok_or(AppError::NoDocument)?;
        let answer = qa.answer(question).await?;

        self.turns.push(QaTurn {
            question: question.to_string(),
            answer: answer.clone(),
        });
        Ok(answer)
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }
}
