//! POST /session — creates a session with a tier choice and credential.

use std::sync::Arc;

use axum::{Json, extract::State};
use chat_qa::BackendChoice;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    core::{app_state::AppState, session::Session},
    error_handler::AppResult,
};

/// Request payload for /session.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Tier choice: `"paid"`, `"free"`, or omitted.
    #[serde(default)]
    pub backend: BackendChoice,
    /// Credential for the hosted tier. Accepted once at session creation;
    /// never logged.
    #[serde(default)]
    pub api_key: String,
}

/// Response payload for /session.
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

/// Handler: POST /session
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/session \
///   -H 'content-type: application/json' \
///   -d '{"backend":"paid","api_key":"sk-..."}'
/// ```
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateSessionRequest>,
) -> AppResult<Json<CreateSessionResponse>> {
    let has_credential = !body.api_key.trim().is_empty();
    let session = Session::new(body.backend, body.api_key);
    let session_id = state.sessions.insert(session).await;

    info!(%session_id, backend = ?body.backend, has_credential, "session created");

    Ok(Json(CreateSessionResponse { session_id }))
}
