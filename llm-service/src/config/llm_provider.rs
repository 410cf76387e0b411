/// Provider (backend) used for hosted language-model calls.
///
/// `OpenAi` is the paid tier and the only provider with a working client.
/// `HuggingFace` is reserved for the free tier; no client implementation
/// exists yet, and configs tagged with it are rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// OpenAI REST API (chat completions + embeddings).
    OpenAi,
    /// Hugging Face inference API. Declared, not implemented.
    HuggingFace,
}
