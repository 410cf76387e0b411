//! POST /session/{session_id}/ask — asks one question about the document.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /session/{session_id}/ask
///
/// Empty questions yield an empty answer without touching the
/// orchestrator. The first real question on a fresh upload triggers the
/// full load → embed → index build before answering, so it is the slow
/// one.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/session/$SID/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"What is this document about?"}'
/// ```
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<AskRequest>,
) -> AppResult<Json<AskResponse>> {
    let session = state
        .sessions
        .get(&session_id)
        .await
        .ok_or(AppError::SessionNotFound)?;

    let mut guard = session.lock().await;
    debug!(%session_id, question_len = body.question.len(), "question received");

    let answer = guard.ask(&body.question).await?;

    Ok(Json(AskResponse {
        answer,
        history: guard.turns.clone(),
    }))
}
