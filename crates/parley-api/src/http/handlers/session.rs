//! Session reset handler.
//!
//! Endpoint:
//! - POST /api/reset  body `{"system_prompt": string}` -> `{"status": "reset", "chat_id": ...}`

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Value, json};

use crate::http::error::AppError;
use crate::state::AppState;

const BODY_REQUIRED: &str = "Request body must be a JSON object.";

/// POST /api/reset - Start a new session and return its id.
///
/// A missing or non-string `system_prompt` uses the server's default prompt.
pub async fn reset(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = body.map_err(|r| AppError::from_json_rejection(r, BODY_REQUIRED))?;

    let system_prompt = body.get("system_prompt").and_then(Value::as_str);
    let chat_id = state.chat_service.create_session(system_prompt).await;

    Ok(Json(json!({
        "status": "reset",
        "chat_id": chat_id,
    })))
}
