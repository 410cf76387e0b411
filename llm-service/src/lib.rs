//! Hosted language-model clients for the PDF QA backend.
//!
//! The crate exposes a thin OpenAI REST client (chat completions and
//! embeddings), a provider-tagged model configuration, env-driven default
//! configs for the paid tier, and a unified error type.
//!
//! The free tier ([`config::llm_provider::LlmProvider::HuggingFace`]) is
//! declared but has no client implementation; selecting it is rejected by
//! the orchestration layer before any request is made.

pub mod config;
pub mod error_handler;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{ConfigError, LlmError, ProviderError, ProviderErrorKind};
pub use services::open_ai_service::{ChatMessage, OpenAiService};
