//! API self-description.

use axum::Json;
use serde_json::{Value, json};

/// GET /api/info - Describe the available endpoints.
pub async fn info() -> Json<Value> {
    Json(json!({
        "endpoints": [
            {
                "path": "/api/info",
                "methods": ["GET", "OPTIONS"],
                "description": "Get API usage information.",
            },
            {
                "path": "/api/reset",
                "methods": ["POST", "OPTIONS"],
                "description": "Reset the conversation and get a chat id.",
            },
            {
                "path": "/api/chat/<chat_id>",
                "methods": ["POST", "OPTIONS"],
                "description": "Send a prompt and get a reply for a specific chat id. JSON: { 'prompt': <string> }",
            },
        ],
        "prompt_format": { "prompt": "<string>" },
    }))
}
