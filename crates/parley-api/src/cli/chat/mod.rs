//! Interactive console chat.
//!
//! One loop-local conversation, read with an async readline and answered by
//! the same turn processor the HTTP API uses. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod input;
pub mod loop_runner;
