//! Infrastructure layer for Parley.
//!
//! Contains the OpenAI-compatible implementation of the engine trait defined
//! in `parley-core` and the loaders for the config file and system prompt.

pub mod config;
pub mod llm;
