//! Application error type mapping to HTTP status codes and the `{"error": ...}` body.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parley_types::error::ChatError;

pub const UNSUPPORTED_MEDIA_TYPE: &str = "Content-Type must be application/json";
pub const INVALID_CHAT_ID: &str = "Invalid chat id.";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Chat(ChatError),
    /// Request body is not declared as JSON.
    UnsupportedMediaType,
    /// Body could not be used; carries the client-facing message.
    BadRequest(String),
    Internal(String),
}

impl AppError {
    /// Map a JSON extractor rejection: a missing JSON content type is 415,
    /// anything else (bad syntax, wrong shape) is 400 with `bad_request`.
    pub fn from_json_rejection(rejection: JsonRejection, bad_request: &str) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => AppError::UnsupportedMediaType,
            other => {
                tracing::debug!(error = %other, "Rejected request body");
                AppError::BadRequest(bad_request.to_string())
            }
        }
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Chat(ChatError::InvalidPrompt(_)) => (
                StatusCode::BAD_REQUEST,
                crate::http::handlers::chat::PROMPT_REQUIRED.to_string(),
            ),
            AppError::Chat(ChatError::SessionNotFound(_)) => {
                (StatusCode::NOT_FOUND, INVALID_CHAT_ID.to_string())
            }
            AppError::Chat(ChatError::EngineFailure(e)) => {
                tracing::error!(error = %e, "Chat turn failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                UNSUPPORTED_MEDIA_TYPE.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
