//! Default model configs for the paid (OpenAI) tier.
//!
//! The credential is always supplied by the caller — it comes from the
//! client session, never from the environment. Everything else is read
//! from environment variables with working defaults:
//!
//! - `OPENAI_URL`         = API base (default `https://api.openai.com`)
//! - `OPENAI_CHAT_MODEL`  = chat model (default `gpt-3.5-turbo`)
//! - `OPENAI_EMBED_MODEL` = embedding model (default `text-embedding-ada-002`)
//! - `LLM_MAX_TOKENS`     = optional max tokens for chat (u32)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ConfigError, LlmError},
};

/// Resolves the OpenAI endpoint from `OPENAI_URL`, falling back to the
/// public API base.
fn openai_endpoint() -> String {
    std::env::var("OPENAI_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "https://api.openai.com".to_string())
}

/// Reads an optional `u32` env var.
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but does
/// not parse.
fn env_opt_u32(var: &'static str) -> Result<Option<u32>, LlmError> {
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => {
            let parsed = raw.parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
                var,
                reason: "expected u32",
            })?;
            Ok(Some(parsed))
        }
        _ => Ok(None),
    }
}

/// Config for the **chat** role of the paid tier.
///
/// # Defaults
/// - `temperature = Some(0.3)`
/// - `timeout_secs = Some(120)`
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if `LLM_MAX_TOKENS` is malformed.
pub fn config_openai_chat(api_key: &str) -> Result<LlmModelConfig, LlmError> {
    let model = std::env::var("OPENAI_CHAT_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "gpt-3.5-turbo".to_string());
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAi,
        model,
        endpoint: openai_endpoint(),
        api_key: Some(api_key.to_string()),
        max_tokens,
        temperature: Some(0.3),
        top_p: None,
        timeout_secs: Some(120),
    })
}

/// Config for the **embedding** role of the paid tier.
///
/// # Defaults
/// - deterministic (`temperature = None`, embeddings ignore sampling)
/// - `timeout_secs = Some(60)`
pub fn config_openai_embedding(api_key: &str) -> Result<LlmModelConfig, LlmError> {
    let model = std::env::var("OPENAI_EMBED_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "text-embedding-ada-002".to_string());

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAi,
        model,
        endpoint: openai_endpoint(),
        api_key: Some(api_key.to_string()),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(60),
    })
}
