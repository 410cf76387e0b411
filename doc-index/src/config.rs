//! Index configuration.

use std::path::PathBuf;

/// Number of chunks the retriever returns per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Default number of concurrent embedding requests during an index build.
pub const DEFAULT_EMBED_CONCURRENCY: usize = 4;

/// Configuration for one document index.
///
/// `root` is the shared index root; `scope` is the session (or document)
/// key that isolates this index from every other one. The scoped layout is
/// what prevents two sessions from racing on the same directory.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Shared root for all indexes (e.g. `<data_dir>/index`).
    pub root: PathBuf,
    /// Per-session or per-document subdirectory key.
    pub scope: String,
    /// Top-k for similarity search.
    pub top_k: usize,
    /// Concurrent embedding requests while building.
    pub embed_concurrency: usize,
}

impl IndexConfig {
    /// Builds a config with defaults, honoring `EMBEDDING_CONCURRENCY`.
    pub fn new(root: impl Into<PathBuf>, scope: impl Into<String>) -> Self {
        let embed_concurrency = std::env::var("EMBEDDING_CONCURRENCY")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_EMBED_CONCURRENCY);

        Self {
            root: root.into(),
            scope: scope.into(),
            top_k: DEFAULT_TOP_K,
            embed_concurrency,
        }
    }

    /// The scoped directory this index persists into.
    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.scope)
    }
}
