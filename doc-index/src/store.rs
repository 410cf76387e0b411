//! Persisted on-disk vector index with flat cosine search.
//!
//! The index is a single JSON file under a scoped directory. At most one
//! index exists per directory; [`clear_index_dir`] removes any previous
//! state before a rebuild (idempotent: absence is a no-op).

use std::fs;
use std::path::Path;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::embed::Embedder;
use crate::errors::IndexError;
use crate::pdf::PageChunk;

/// File name of the persisted index inside its scoped directory.
pub const INDEX_FILE: &str = "index.json";

/// One indexed chunk: the page it came from, its text, and its vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRecord {
    pub page: u32,
    pub text: String,
    pub vector: Vec<f32>,
}

/// In-memory similarity index, persisted as JSON.
///
/// Search is a flat cosine scan. Documents here are a handful of pages, so
/// the scan stays well below any latency that would justify an ANN
/// structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct VectorIndex {
    dim: usize,
    records: Vec<IndexRecord>,
}

impl VectorIndex {
    /// Embeds all chunks (bounded concurrency, order-preserving) and builds
    /// a fresh index.
    ///
    /// # Errors
    /// - embedding failures from the provider
    /// - [`IndexError::VectorSizeMismatch`] if vectors disagree in length
    /// - [`IndexError::EmptyDocument`] on an empty chunk slice
    pub async fn build(
        chunks: &[PageChunk],
        embedder: &dyn Embedder,
        concurrency: usize,
    ) -> Result<Self, IndexError> {
        if chunks.is_empty() {
            return Err(IndexError::EmptyDocument);
        }

        trace!(chunks = chunks.len(), concurrency, "embedding chunks");
        // The embed futures are created eagerly (they stay lazy until
        // polled) so no borrowing closure is captured in this async fn;
        // rustc otherwise rejects callers with "implementation of
        // `FnOnce` is not general enough".
        let futures: Vec<_> = chunks.iter().map(|c| embedder.embed(&c.text)).collect();
        let vectors: Vec<Result<Vec<f32>, IndexError>> = stream::iter(futures)
            .buffered(concurrency.max(1))
            .collect()
            .await;

        let mut records = Vec::with_capacity(chunks.len());
        let mut dim = 0usize;
        for (chunk, vector) in chunks.iter().zip(vectors) {
            let vector = vector?;
            if dim == 0 {
                dim = vector.len();
            } else if vector.len() != dim {
                return Err(IndexError::VectorSizeMismatch {
                    got: vector.len(),
                    want: dim,
                });
            }
            records.push(IndexRecord {
                page: chunk.page,
                text: chunk.text.clone(),
                vector,
            });
        }

        info!(records = records.len(), dim, "vector index built");
        Ok(Self { dim, records })
    }

    /// Writes the index to `<dir>/index.json`, creating the directory.
    ///
    /// # Errors
    /// I/O or serialization failures.
    pub fn persist(&self, dir: &Path) -> Result<(), IndexError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(INDEX_FILE);
        let json = serde_json::to_vec(self)?;
        fs::write(&path, json)?;
        debug!(path = %path.display(), records = self.records.len(), "index persisted");
        Ok(())
    }

    /// Loads a previously persisted index from `<dir>/index.json`.
    ///
    /// # Errors
    /// I/O (including absence) or parse failures.
    pub fn open(dir: &Path) -> Result<Self, IndexError> {
        let bytes = fs::read(dir.join(INDEX_FILE))?;
        let index: Self = serde_json::from_slice(&bytes)?;
        Ok(index)
    }

    /// Returns the `top_k` records most similar to `query`, best first.
    ///
    /// Scores are cosine similarities in `[-1, 1]`.
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<(f32, &IndexRecord)> {
        let mut scored: Vec<(f32, &IndexRecord)> = self
            .records
            .iter()
            .map(|r| (cosine(query, &r.vector), r))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        scored
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }
}

/// Deletes the scoped index directory and everything in it.
///
/// Idempotent: a missing directory is not an error. A permission failure
/// propagates and blocks the rebuild.
pub fn clear_index_dir(dir: &Path) -> Result<(), IndexError> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
        debug!(dir = %dir.display(), "stale index removed");
    }
    Ok(())
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0f32;
    let mut na = 0f32;
    let mut nb = 0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{future::Future, pin::Pin};

    /// Deterministic embedder: maps each text onto a fixed 3-dim axis.
    struct AxisEmbedder;

    impl Embedder for AxisEmbedder {
        fn embed<'a>(
            &'a self,
            text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, IndexError>> + Send + 'a>> {
            let v = match text {
                t if t.contains("apples") => vec![1.0, 0.0, 0.1],
                t if t.contains("oranges") => vec![0.0, 1.0, 0.1],
                _ => vec![0.0, 0.0, 1.0],
            };
            Box::pin(async move { Ok(v) })
        }
    }

    fn chunks() -> Vec<PageChunk> {
        vec![
            PageChunk {
                page: 1,
                text: "apples grow on trees".into(),
            },
            PageChunk {
                page: 2,
                text: "oranges are citrus".into(),
            },
            PageChunk {
                page: 3,
                text: "unrelated page".into(),
            },
        ]
    }

    #[tokio::test]
    async fn build_persist_open_roundtrip() {
        let index = VectorIndex::build(&chunks(), &AxisEmbedder, 2).await.unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.dim(), 3);

        let dir = tempfile::tempdir().unwrap();
        let scoped = dir.path().join("session-a");
        index.persist(&scoped).unwrap();
        assert!(scoped.join(INDEX_FILE).exists());

        let reopened = VectorIndex::open(&scoped).unwrap();
        assert_eq!(reopened.len(), 3);
        assert_eq!(reopened.dim(), 3);
    }

    #[tokio::test]
    async fn search_ranks_by_cosine() {
        let index = VectorIndex::build(&chunks(), &AxisEmbedder, 1).await.unwrap();
        let hits = index.search(&[1.0, 0.0, 0.0], 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].1.page, 1);
        assert!(hits[0].0 > hits[1].0);
    }

    #[tokio::test]
    async fn empty_chunk_slice_is_rejected() {
        let err = VectorIndex::build(&[], &AxisEmbedder, 1).await.unwrap_err();
        assert!(matches!(err, IndexError::EmptyDocument));
    }

    #[test]
    fn clear_is_idempotent_and_removes_contents() {
        let dir = tempfile::tempdir().unwrap();
        let scoped = dir.path().join("session-b");

        // Absent directory: no-op.
        clear_index_dir(&scoped).unwrap();

        std::fs::create_dir_all(&scoped).unwrap();
        std::fs::write(scoped.join("stale.json"), b"{}").unwrap();
        clear_index_dir(&scoped).unwrap();
        assert!(!scoped.exists());

        // Second call after removal: still fine.
        clear_index_dir(&scoped).unwrap();
    }
}
