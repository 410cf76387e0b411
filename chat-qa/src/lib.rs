//! Document QA orchestrator.
//!
//! [`DocumentQa`] owns one document's lifecycle for one session: on the
//! first question it removes any stale index, loads and splits the PDF,
//! resolves the model backend, builds and persists a fresh vector index,
//! and wires the conversational retrieval pipeline; every question then
//! flows through that pipeline with one turn of conversational memory.
//!
//! The instance moves `Uninitialized → Initializing → Ready` exactly once,
//! driven by the first successful [`DocumentQa::answer`] call; there is no
//! transition back and no cancellation path.

pub mod backend;
pub mod error;
pub mod memory;
pub mod pipeline;
pub mod prompt;

pub use backend::{BackendChoice, ChatModel, ModelBackend};
pub use error::QaError;
pub use memory::{ConversationMemory, QaTurn};
pub use pipeline::RetrievalPipeline;

use std::path::PathBuf;

use tracing::{debug, info};

use doc_index::{IndexConfig, Retriever, VectorIndex, clear_index_dir, pdf};

/// Question-answering orchestrator for a single uploaded document.
///
/// Construction performs no I/O; all heavy work happens lazily on the
/// first question. One instance per session; dropped with the session.
pub struct DocumentQa {
    choice: BackendChoice,
    credential: String,
    document_path: PathBuf,
    index_cfg: IndexConfig,
    /// Pre-resolved backend, if the caller already holds clients.
    backend: Option<ModelBackend>,
    /// Every question asked so far. Doubles as the "has initialization
    /// happened" flag; it is only appended after a successful answer.
    asked: Vec<String>,
    pipeline: Option<RetrievalPipeline>,
}

impl DocumentQa {
    /// Creates an orchestrator that resolves its backend from the session's
    /// tier choice and credential on first use. No I/O is performed here.
    pub fn new(
        choice: BackendChoice,
        credential: impl Into<String>,
        document_path: impl Into<PathBuf>,
        index_cfg: IndexConfig,
    ) -> Self {
        Self {
            choice,
            credential: credential.into(),
            document_path: document_path.into(),
            index_cfg,
            backend: None,
            asked: Vec::new(),
            pipeline: None,
        }
    }

    /// Creates an orchestrator around an already-resolved backend.
    pub fn with_backend(
        backend: ModelBackend,
        document_path: impl Into<PathBuf>,
        index_cfg: IndexConfig,
    ) -> Self {
        Self {
            choice: BackendChoice::Unselected,
            credential: String::new(),
            document_path: document_path.into(),
            index_cfg,
            backend: Some(backend),
            asked: Vec::new(),
            pipeline: None,
        }
    }

    /// Answers one question about the document.
    ///
    /// The first call performs full initialization before answering. The
    /// retained history is replaced with exactly this `(question, answer)`
    /// pair on success.
    ///
    /// Callers are expected to filter empty questions; this method does not
    /// special-case them.
    ///
    /// # Errors
    /// Any failure in loading, embedding, indexing, backend resolution, or
    /// generation propagates uncaught; there is no retry. A failed first
    /// call leaves the instance uninitialized.
    pub async fn answer(&mut self, question: &str) -> Result<String, QaError> {
        if self.asked.is_empty() {
            let pipeline = self.initialize().await?;
            self.pipeline = Some(pipeline);
            info!("qa pipeline initialized");
        }

        let pipeline = self.pipeline.as_mut().ok_or(QaError::NotInitialized)?;
        let answer = pipeline.ask(question).await?;
        self.asked.push(question.to_string());
        Ok(answer)
    }

    /// Full initialization: stale-index cleanup, document load/split,
    /// backend resolution, index build + persist, pipeline wiring.
    async fn initialize(&mut self) -> Result<RetrievalPipeline, QaError> {
        let dir = self.index_cfg.dir();
        clear_index_dir(&dir)?;

        let pages = pdf::load_pages(&self.document_path)?;
        debug!(pages = pages.len(), "document split into page chunks");

        let backend = match self.backend.take() {
            Some(backend) => backend,
            None => ModelBackend::resolve(self.choice, &self.credential)?,
        };
        let (llm, embedder) = match backend {
            ModelBackend::Paid { llm, embedder } => (llm, embedder),
            ModelBackend::Free => {
                self.backend = Some(ModelBackend::Free);
                return Err(QaError::FreeBackendUnavailable);
            }
            ModelBackend::Unselected => {
                self.backend = Some(ModelBackend::Unselected);
                return Err(QaError::BackendUnselected);
            }
        };

        let index = VectorIndex::build(
            &pages,
            embedder.as_ref(),
            self.index_cfg.embed_concurrency,
        )
        .await?;
        index.persist(&dir)?;

        let retriever = Retriever::new(index, embedder, self.index_cfg.top_k);
        Ok(RetrievalPipeline::new(llm, retriever))
    }

    /// The single retained `(question, answer)` pair, if any.
    pub fn history(&self) -> Option<&QaTurn> {
        self.pipeline.as_ref().and_then(|p| p.memory().last())
    }

    /// Every question asked on this instance, in order.
    pub fn questions(&self) -> &[String] {
        &self.asked
    }

    /// Whether the pipeline has been built.
    pub fn is_ready(&self) -> bool {
        self.pipeline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::{future::Future, pin::Pin};

    use doc_index::{Embedder, IndexError, store::INDEX_FILE};
    use llm_service::ChatMessage;
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    /// Deterministic embedder that counts invocations.
    struct CountingEmbedder {
        calls: Arc<AtomicUsize>,
    }

    impl Embedder for CountingEmbedder {
        fn embed<'a>(
            &'a self,
            text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, IndexError>> + Send + 'a>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut v = [0f32; 4];
            for (i, b) in text.bytes().enumerate() {
                v[i % 4] += b as f32;
            }
            let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1.0);
            Box::pin(async move { Ok(v.iter().map(|x| x / norm).collect()) })
        }
    }

    /// Chat mock that records every message array it receives.
    struct RecordingChat {
        calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    }

    impl ChatModel for RecordingChat {
        fn generate<'a>(
            &'a self,
            messages: &'a [ChatMessage],
        ) -> Pin<Box<dyn Future<Output = Result<String, QaError>> + Send + 'a>> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(messages.to_vec());
            let n = calls.len();
            Box::pin(async move { Ok(format!("answer-{n}")) })
        }
    }

    fn mock_backend() -> (ModelBackend, Arc<AtomicUsize>, Arc<Mutex<Vec<Vec<ChatMessage>>>>) {
        let embeds = Arc::new(AtomicUsize::new(0));
        let chats = Arc::new(Mutex::new(Vec::new()));
        let backend = ModelBackend::Paid {
            llm: Arc::new(RecordingChat {
                calls: chats.clone(),
            }),
            embedder: Arc::new(CountingEmbedder {
                calls: embeds.clone(),
            }),
        };
        (backend, embeds, chats)
    }

    /// Writes a minimal three-page PDF.
    fn write_pdf(path: &Path, lines: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in lines {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    fn setup(dir: &Path) -> (PathBuf, IndexConfig) {
        let pdf_path = dir.join("doc.pdf");
        write_pdf(
            &pdf_path,
            &["chapter one intro", "chapter two details", "chapter three end"],
        );
        let cfg = IndexConfig::new(dir.join("index"), "session-1");
        (pdf_path, cfg)
    }

    #[tokio::test]
    async fn first_question_initializes_exactly_once() {
        let tmp = tempfile::tempdir().unwrap();
        let (pdf_path, cfg) = setup(tmp.path());
        let index_dir = cfg.dir();
        let (backend, embeds, _chats) = mock_backend();
        let mut qa = DocumentQa::with_backend(backend, &pdf_path, cfg);

        assert!(!qa.is_ready());
        let a1 = qa.answer("What is this document about?").await.unwrap();
        assert!(!a1.is_empty());
        assert!(qa.is_ready());
        assert!(index_dir.join(INDEX_FILE).exists());

        // 3 pages embedded once, plus 1 query embedding.
        assert_eq!(embeds.load(Ordering::SeqCst), 4);

        qa.answer("And the second chapter?").await.unwrap();
        // Only the new query embedding; no re-initialization.
        assert_eq!(embeds.load(Ordering::SeqCst), 5);
        assert_eq!(qa.questions().len(), 2);
    }

    #[tokio::test]
    async fn history_is_exactly_the_latest_pair() {
        let tmp = tempfile::tempdir().unwrap();
        let (pdf_path, cfg) = setup(tmp.path());
        let (backend, _embeds, chats) = mock_backend();
        let mut qa = DocumentQa::with_backend(backend, &pdf_path, cfg);

        let a1 = qa.answer("q1").await.unwrap();
        {
            let turn = qa.history().unwrap();
            assert_eq!(turn.question, "q1");
            assert_eq!(turn.answer, a1);
        }

        let a2 = qa.answer("q2").await.unwrap();
        let turn = qa.history().unwrap();
        assert_eq!(turn.question, "q2");
        assert_eq!(turn.answer, a2);

        // The second pipeline call saw exactly the first turn as history:
        // [system, user(q1), assistant(a1), user(prompt-for-q2)].
        let calls = chats.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].len(), 2); // no history on the first call
        let second = &calls[1];
        assert_eq!(second.len(), 4);
        assert_eq!(second[1].role, "user");
        assert_eq!(second[1].content, "q1");
        assert_eq!(second[2].role, "assistant");
        assert_eq!(second[2].content, a1);
        assert!(second[3].content.contains("q2"));
    }

    #[tokio::test]
    async fn stale_index_is_removed_before_rebuild() {
        let tmp = tempfile::tempdir().unwrap();
        let (pdf_path, cfg) = setup(tmp.path());
        let index_dir = cfg.dir();

        // Leftovers from a previous document in the same session slot.
        std::fs::create_dir_all(&index_dir).unwrap();
        std::fs::write(index_dir.join("stale.json"), b"{}").unwrap();

        let (backend, _embeds, _chats) = mock_backend();
        let mut qa = DocumentQa::with_backend(backend, &pdf_path, cfg);
        qa.answer("anything").await.unwrap();

        assert!(!index_dir.join("stale.json").exists());
        assert!(index_dir.join(INDEX_FILE).exists());
    }

    #[tokio::test]
    async fn free_tier_is_explicitly_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let (pdf_path, cfg) = setup(tmp.path());
        let mut qa = DocumentQa::with_backend(ModelBackend::Free, &pdf_path, cfg);

        let err = qa.answer("anything").await.unwrap_err();
        assert!(matches!(err, QaError::FreeBackendUnavailable));
        assert!(!qa.is_ready());
        assert!(qa.questions().is_empty());
    }

    #[tokio::test]
    async fn unselected_backend_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let (pdf_path, cfg) = setup(tmp.path());
        let mut qa = DocumentQa::with_backend(ModelBackend::Unselected, &pdf_path, cfg);

        let err = qa.answer("anything").await.unwrap_err();
        assert!(matches!(err, QaError::BackendUnselected));
    }

    #[tokio::test]
    async fn paid_tier_without_credential_propagates() {
        let tmp = tempfile::tempdir().unwrap();
        let (pdf_path, cfg) = setup(tmp.path());
        let mut qa = DocumentQa::new(BackendChoice::Paid, "", &pdf_path, cfg);

        let err = qa.answer("anything").await.unwrap_err();
        assert!(matches!(err, QaError::Llm(_)));
        assert!(!qa.is_ready());
    }
}
