//! Conversational retrieval pipeline.
//!
//! Binds a chat model, a top-k retriever over the fresh index, and the
//! one-turn conversation memory. Each call retrieves context for the
//! question, prepends the memory's message objects, asks the model, and
//! replaces the memory with the new turn.

use tracing::debug;

use doc_index::Retriever;
use llm_service::ChatMessage;

use crate::backend::ChatModel;
use crate::error::QaError;
use crate::memory::{ConversationMemory, QaTurn};
use crate::prompt;

use std::sync::Arc;

pub struct RetrievalPipeline {
    llm: Arc<dyn ChatModel>,
    retriever: Retriever,
    memory: ConversationMemory,
}

impl RetrievalPipeline {
    pub fn new(llm: Arc<dyn ChatModel>, retriever: Retriever) -> Self {
        Self {
            llm,
            retriever,
            memory: ConversationMemory::new(),
        }
    }

    /// Answers one question with retrieval augmentation and the current
    /// chat history, then replaces the history with this turn.
    ///
    /// # Errors
    /// Propagates retrieval and generation failures; the memory is only
    /// updated on success.
    pub async fn ask(&mut self, question: &str) -> Result<String, QaError> {
        let context = self.retriever.retrieve(question).await?;
        debug!(
            context_chunks = context.len(),
            has_history = self.memory.last().is_some(),
            "pipeline invoked"
        );

        let mut messages = vec![ChatMessage::system(prompt::DEFAULT_SYSTEM.trim())];
        messages.extend(self.memory.messages());
        messages.push(ChatMessage::user(prompt::build_user_prompt(
            question,
            &context,
            prompt::DEFAULT_MAX_CTX_CHARS,
        )));

        let answer = self.llm.generate(&messages).await?;

        self.memory.replace(QaTurn {
            question: question.to_string(),
            answer: answer.clone(),
        });

        Ok(answer)
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }
}
