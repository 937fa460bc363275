//! Chat turn handler.
//!
//! Endpoint:
//! - POST /api/chat/{chat_id}  body `{"prompt": string}` -> `{"reply": string}`

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use parley_types::chat::SessionId;
use parley_types::error::ChatError;

use crate::http::error::AppError;
use crate::state::AppState;

pub const PROMPT_REQUIRED: &str = "JSON body must contain a \"prompt\" key with a string value.";

/// POST /api/chat/{chat_id} - Run one turn on a session.
///
/// Checks run in order: content type (415), prompt (400), session (404).
/// The turn itself runs on its own task so a client that hangs up does not
/// cancel it halfway.
pub async fn chat(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = body.map_err(|r| AppError::from_json_rejection(r, PROMPT_REQUIRED))?;

    let prompt = body
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(PROMPT_REQUIRED.to_string()))?
        .to_string();

    // An id that is not even a UUID can never name a live session.
    let id: SessionId = chat_id
        .parse()
        .map_err(|_| ChatError::SessionNotFound(chat_id.clone()))?;

    tracing::info!(session_id = %id, prompt = %prompt, "User prompt");

    let service = Arc::clone(&state.chat_service);
    let reply = tokio::spawn(async move { service.chat(&id, &prompt).await })
        .await
        .map_err(|e| AppError::Internal(format!("chat task failed: {e}")))??;

    Ok(Json(json!({ "reply": reply })))
}
