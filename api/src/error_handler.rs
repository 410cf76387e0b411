use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chat_qa::QaError;
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("session not found")]
    SessionNotFound,

    #[error("no document uploaded for this session")]
    NoDocument,

    // --- Orchestrator ---
    #[error(transparent)]
    Qa(#[from] QaError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::SessionNotFound => StatusCode::NOT_FOUND,
            AppError::NoDocument => StatusCode::BAD_REQUEST,
            AppError::Qa(QaError::BackendUnselected)
            | AppError::Qa(QaError::FreeBackendUnavailable) => StatusCode::BAD_REQUEST,

            // Downstream collaborators: the failure is fatal for this
            // interaction and surfaces as an upstream error.
            AppError::Qa(_) => StatusCode::BAD_GATEWAY,

            // 5xx
            AppError::Bind(_) | AppError::Server(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::SessionNotFound => "SESSION_NOT_FOUND",
            AppError::NoDocument => "NO_DOCUMENT",
            AppError::Qa(QaError::BackendUnselected) => "BACKEND_UNSELECTED",
            AppError::Qa(QaError::FreeBackendUnavailable) => "FREE_TIER_UNAVAILABLE",
            AppError::Qa(_) => "QA_ERROR",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
