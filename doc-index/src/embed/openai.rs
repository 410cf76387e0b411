//! OpenAI-backed embedding provider.
//!
//! Wraps an [`OpenAiService`] configured for the embeddings role and
//! adapts its errors into [`IndexError`]. Vector dimensionality is not
//! checked here; the index build validates consistency across records.

use std::sync::Arc;

use llm_service::OpenAiService;

use crate::{Embedder, IndexError};

/// OpenAI embedding provider (async).
#[derive(Clone)]
pub struct OpenAiEmbedder {
    svc: Arc<OpenAiService>,
}

impl OpenAiEmbedder {
    /// Constructs a new embedder over an embeddings-role service.
    pub fn new(svc: Arc<OpenAiService>) -> Self {
        Self { svc }
    }
}

impl Embedder for OpenAiEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<f32>, IndexError>> + Send + 'a>,
    > {
        Box::pin(async move {
            self.svc
                .embed(text)
                .await
                .map_err(|e| IndexError::Embed(e.to_string()))
        })
    }
}
