//! Axum router configuration with middleware.
//!
//! API routes live under `/api/`. Middleware: CORS, tracing.
//!
//! `CorsLayer` answers every OPTIONS request itself with an empty 200, so the
//! routes only register their real methods.
//!
//! Static files are served from the web directory when it exists: `/` is its
//! `index.html`, `/game` is `game/index.html`, and any other path maps to the
//! file of the same name. API routes and `/health` take priority. If the
//! directory does not exist, only the API is served.
//!
//! No web assets ship with Parley. Point `server.web_dir` at a front-end
//! build (`index.html`, `game/index.html` and their scripts) that talks to
//! `/api/reset` and `/api/chat/{chat_id}`.

use std::path::Path;

use axum::Router;
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState, web_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/info", get(handlers::info::info))
        .route("/reset", post(handlers::session::reset))
        .route("/chat/{chat_id}", post(handlers::chat::chat));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check));

    if web_dir.is_dir() {
        router = router
            .route_service("/game", ServeFile::new(web_dir.join("game").join("index.html")))
            .fallback_service(ServeDir::new(web_dir));
        tracing::info!(path = %web_dir.display(), "Static file serving enabled");
    } else {
        tracing::warn!(path = %web_dir.display(), "Web directory not found, serving API only");
    }

    router
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness check.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
