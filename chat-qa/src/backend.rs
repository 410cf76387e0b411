//! Backend selection: the user's tier choice and its resolved clients.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};
use tracing::info;

use doc_index::Embedder;
use doc_index::embed::openai::OpenAiEmbedder;
use llm_service::config::default_config::{config_openai_chat, config_openai_embedding};
use llm_service::{ChatMessage, OpenAiService};

use crate::error::QaError;

/// The tier a session selected, as submitted by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// Nothing chosen yet.
    #[default]
    Unselected,
    /// Hosted OpenAI tier; requires a credential.
    Paid,
    /// Free tier. Declared, not implemented.
    Free,
}

/// Chat-model seam: anything that can answer a message array.
///
/// The paid tier plugs [`OpenAiService`] in here; tests plug in mocks.
pub trait ChatModel: Send + Sync {
    fn generate<'a>(
        &'a self,
        messages: &'a [ChatMessage],
    ) -> Pin<Box<dyn Future<Output = Result<String, QaError>> + Send + 'a>>;
}

impl ChatModel for OpenAiService {
    fn generate<'a>(
        &'a self,
        messages: &'a [ChatMessage],
    ) -> Pin<Box<dyn Future<Output = Result<String, QaError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.chat(messages).await?) })
    }
}

/// Resolved model/embedding state for one orchestrator instance.
///
/// The unimplemented free tier is an explicit, checkable variant instead
/// of a silently unset pair of clients.
pub enum ModelBackend {
    /// No tier selected; pipeline construction fails.
    Unselected,
    /// Paid tier with working clients.
    Paid {
        llm: Arc<dyn ChatModel>,
        embedder: Arc<dyn Embedder>,
    },
    /// Free tier: reserved, pipeline construction fails with a distinct
    /// error until a client implementation exists.
    Free,
}

impl std::fmt::Debug for ModelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelBackend::Unselected => f.write_str("Unselected"),
            ModelBackend::Paid { .. } => f.write_str("Paid { .. }"),
            ModelBackend::Free => f.write_str("Free"),
        }
    }
}

impl ModelBackend {
    /// Resolves the session's choice into concrete clients.
    ///
    /// The paid tier constructs the OpenAI chat and embedding clients from
    /// the credential; construction fails on an empty credential and the
    /// failure propagates to the caller. The free and unselected choices
    /// resolve to their explicit placeholder variants without I/O.
    ///
    /// # Errors
    /// Propagates client construction failures ([`QaError::Llm`]).
    pub fn resolve(choice: BackendChoice, credential: &str) -> Result<Self, QaError> {
        match choice {
            BackendChoice::Paid => {
                let llm = Arc::new(OpenAiService::new(config_openai_chat(credential)?)?);
                let embedding_svc =
                    Arc::new(OpenAiService::new(config_openai_embedding(credential)?)?);
                info!("paid backend resolved");
                Ok(ModelBackend::Paid {
                    llm,
                    embedder: Arc::new(OpenAiEmbedder::new(embedding_svc)),
                })
            }
            BackendChoice::Free => Ok(ModelBackend::Free),
            BackendChoice::Unselected => Ok(ModelBackend::Unselected),
        }
    }
}
