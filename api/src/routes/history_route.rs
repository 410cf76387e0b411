//! GET /session/{session_id}/history — the session's display history.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use chat_qa::QaTurn;
use uuid::Uuid;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
};

/// Handler: GET /session/{session_id}/history
pub async fn session_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<Vec<QaTurn>>> {
    let session = state
        .sessions
        .get(&session_id)
        .await
        .ok_or(AppError::SessionNotFound)?;

    let guard = session.lock().await;
    Ok(Json(guard.turns.clone()))
}
