use crate::config::llm_provider::LlmProvider;

/// Configuration for a hosted model invocation.
///
/// One config describes one role (chat or embeddings); the orchestration
/// layer builds two of these from the same credential.
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier (e.g. `"gpt-3.5-turbo"`, `"text-embedding-ada-002"`).
    pub model: String,

    /// API base URL (e.g. `"https://api.openai.com"`).
    pub endpoint: String,

    /// API key. Required for OpenAI; validated at client construction.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate (chat only).
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}
