//! One-turn conversational memory.
//!
//! The buffer retains exactly the most recent `(question, answer)` pair and
//! emits it as full role/content message objects for the next pipeline
//! call. Older turns are discarded on every replacement.

use llm_service::ChatMessage;
use serde::{Deserialize, Serialize};

/// A single question/answer exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaTurn {
    pub question: String,
    pub answer: String,
}

/// Conversation buffer holding at most one turn.
#[derive(Debug, Default)]
pub struct ConversationMemory {
    last: Option<QaTurn>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The retained turn, if any.
    pub fn last(&self) -> Option<&QaTurn> {
        self.last.as_ref()
    }

    /// Replaces the buffer with exactly `turn`, discarding anything prior.
    pub fn replace(&mut self, turn: QaTurn) {
        self.last = Some(turn);
    }

    /// Renders the retained turn as message objects (`user`, `assistant`),
    /// or an empty list on a fresh buffer.
    pub fn messages(&self) -> Vec<ChatMessage> {
        match &self.last {
            Some(turn) => vec![
                ChatMessage::user(turn.question.as_str()),
                ChatMessage::assistant(turn.answer.as_str()),
            ],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_buffer_yields_no_messages() {
        let memory = ConversationMemory::new();
        assert!(memory.last().is_none());
        assert!(memory.messages().is_empty());
    }

    #[test]
    fn replace_discards_prior_turn() {
        let mut memory = ConversationMemory::new();
        memory.replace(QaTurn {
            question: "q1".into(),
            answer: "a1".into(),
        });
        memory.replace(QaTurn {
            question: "q2".into(),
            answer: "a2".into(),
        });

        let turn = memory.last().unwrap();
        assert_eq!(turn.question, "q2");

        let messages = memory.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, "q2");
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(messages[1].content, "a2");
    }
}
