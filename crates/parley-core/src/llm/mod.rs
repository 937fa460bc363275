//! Generation engine abstractions for Parley.
//!
//! - `LlmProvider`: RPITIT trait for concrete engine clients
//! - `BoxLlmProvider`: object-safe wrapper for dynamic dispatch
//! - `probe`: the one-time system-role capability probe

pub mod box_provider;
pub mod probe;
pub mod provider;
pub(crate) mod span;

#[cfg(test)]
pub(crate) mod scripted;
