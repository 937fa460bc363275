//! Session handling and engine abstractions for Parley.
//!
//! This crate owns the conversation state machine: the capability probe,
//! conversation bootstrap, the session store and turn processing. It depends
//! only on `parley-types` and `parley-observe`, never on `parley-infra` or any
//! network crate.

pub mod chat;
pub mod llm;

#[cfg(test)]
pub(crate) mod test_support;
