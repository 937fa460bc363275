//! LlmProvider trait definition.
//!
//! This is the port through which the core reaches the generation engine.
//! Uses RPITIT for `complete`; `BoxLlmProvider` adds dynamic dispatch on top.

use parley_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for generation engine backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The call is
/// a single request/response exchange: given the full message history, the
/// engine returns the next assistant message.
///
/// Implementations live in parley-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai_compatible").
    fn name(&self) -> &str;

    /// Model id this provider sends when a request leaves `model` empty.
    fn model(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
