//! HTTP API layer for Parley.
//!
//! Axum router serving `/api/*` with permissive CORS, plus static files from
//! the web directory.

pub mod error;
pub mod handlers;
pub mod router;
