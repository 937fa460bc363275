//! Sessions and turns.
//!
//! - `factory`: bootstrap of a fresh conversation
//! - `store`: the session map and its locking policy
//! - `turn`: one prompt/reply exchange
//! - `service`: the facade the presentation layers call

pub mod factory;
pub mod service;
pub mod store;
pub mod turn;
