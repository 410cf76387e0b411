//! Document indexing: PDF loading, embeddings, and retrieval.
//!
//! This crate covers the three document collaborators of the QA pipeline:
//! - [`pdf::load_pages`] splits a PDF into page-level text chunks
//! - [`embed::Embedder`] is the seam to an embedding backend
//! - [`store::VectorIndex`] is a persisted on-disk similarity index, and
//!   [`retrieve::Retriever`] runs top-k cosine search over it
//!
//! The index lives under a caller-scoped directory (one per session) and is
//! deleted and rebuilt whenever a document is (re)indexed.

pub mod config;
pub mod embed;
pub mod errors;
pub mod pdf;
pub mod retrieve;
pub mod store;

pub use config::IndexConfig;
pub use embed::Embedder;
pub use errors::IndexError;
pub use pdf::PageChunk;
pub use retrieve::{RetrievedChunk, Retriever};
pub use store::{VectorIndex, clear_index_dir};
