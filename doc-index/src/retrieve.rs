//! Retrieval: top-k similarity search over a built index.

use std::sync::Arc;

use tracing::trace;

use crate::embed::Embedder;
use crate::errors::IndexError;
use crate::store::VectorIndex;

/// One retrieved context chunk, score attached.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    /// Cosine similarity against the query.
    pub score: f32,
    /// Source page (1-indexed).
    pub page: u32,
    /// Chunk text.
    pub text: String,
}

/// Query interface over a [`VectorIndex`].
///
/// Owns the index and the embedder used for query vectors; configured for
/// a fixed top-k.
pub struct Retriever {
    index: VectorIndex,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl Retriever {
    pub fn new(index: VectorIndex, embedder: Arc<dyn Embedder>, top_k: usize) -> Self {
        Self {
            index,
            embedder,
            top_k,
        }
    }

    /// Embeds the question and returns the top-k most similar chunks.
    ///
    /// # Errors
    /// Propagates embedding failures.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<RetrievedChunk>, IndexError> {
        let query_vector = self.embedder.embed(question).await?;
        let hits = self.index.search(&query_vector, self.top_k);

        trace!(top_k = self.top_k, hits = hits.len(), "retrieved context");
        Ok(hits
            .into_iter()
            .map(|(score, record)| RetrievedChunk {
                score,
                page: record.page,
                text: record.text.clone(),
            })
            .collect())
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}
