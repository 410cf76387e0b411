//! POST /session/{session_id}/document — uploads the PDF for a session.
//!
//! Saves the raw bytes under the session's data directory and constructs
//! a fresh orchestrator around the saved path. Any previously attached
//! document is replaced.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use doc_index::IndexConfig;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
};

/// Response payload for the document upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Where the document was saved.
    pub saved_to: String,
}

/// Handler: POST /session/{session_id}/document
///
/// Expects a multipart body with a `file` field carrying the PDF.
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let session = state
        .sessions
        .get(&session_id)
        .await
        .ok_or(AppError::SessionNotFound)?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let file_name = sanitize_file_name(field.file_name().unwrap_or("upload.pdf"));
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            upload = Some((file_name, bytes));
            break;
        }
    }
    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("missing `file` field".into()))?;

    let doc_dir = state
        .data_dir
        .join("sessions")
        .join(session_id.to_string());
    tokio::fs::create_dir_all(&doc_dir).await?;
    let path = doc_dir.join(&file_name);
    tokio::fs::write(&path, &bytes).await?;

    // Index state is scoped per session: the orchestrator deletes and
    // rebuilds only its own subdirectory on first use.
    let index_cfg = IndexConfig::new(state.data_dir.join("index"), session_id.to_string());

    let mut guard = session.lock().await;
    guard.attach_document(path.clone(), index_cfg);

    info!(
        %session_id,
        file = %file_name,
        size = bytes.len(),
        "document saved, orchestrator reset"
    );

    Ok(Json(UploadResponse {
        saved_to: path.display().to_string(),
    }))
}

/// Keeps only the final path component of a client-supplied file name.
fn sanitize_file_name(name: &str) -> String {
    let trimmed = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if trimmed.is_empty() {
        "upload.pdf".to_string()
    } else {
        trimmed.to_string()
    }
}
