//! Shared domain types for Parley.
//!
//! This crate contains the types used across the Parley front-end: chat
//! messages, conversations, session ids, configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
