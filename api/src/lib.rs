//! HTTP session controller for the PDF QA backend.
//!
//! A small JSON API over the document QA pipeline. Sessions are explicit
//! objects in an in-memory store, keyed by UUID and passed into each
//! handler; the orchestrator lives inside its session rather than in
//! ambient global state.

mod core;
mod error_handler;
mod routes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use crate::core::app_state::AppState;
use crate::error_handler::AppError;
use crate::routes::{
    ask::ask_question_route::ask_question, create_session_route::create_session,
    history_route::session_history, upload_document_route::upload_document,
};

pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env());

    let app = Router::new()
        .route("/session", post(create_session))
        .route("/session/{session_id}/document", post(upload_document))
        .route("/session/{session_id}/ask", post(ask_question))
        .route("/session/{session_id}/history", get(session_history))
        .with_state(state);

    let addr = std::env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;

    info!(%addr, "pdf-qa api listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
