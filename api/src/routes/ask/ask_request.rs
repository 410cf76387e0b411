use chat_qa::QaTurn;
use serde::{Deserialize, Serialize};

/// Request payload for /session/{session_id}/ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question about the uploaded document.
    pub question: String,
}

/// Response payload for /session/{session_id}/ask.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Model answer; empty when the question was empty.
    pub answer: String,
    /// Full display history, latest turn included.
    pub history: Vec<QaTurn>,
}
