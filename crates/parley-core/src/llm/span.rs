//! GenAI request attributes shared by the probe and chat spans.
//!
//! Spans declare these fields as `field::Empty`; this fills them in.

use tracing::Span;

use parley_observe::genai_attrs::{
    GEN_AI_OPERATION_NAME, GEN_AI_PROVIDER_NAME, GEN_AI_REQUEST_MAX_TOKENS,
    GEN_AI_REQUEST_MODEL, GEN_AI_REQUEST_TEMPERATURE, GEN_AI_REQUEST_TOP_P,
};
use parley_types::llm::CompletionRequest;

use super::box_provider::BoxLlmProvider;

/// Record operation, provider and sampling parameters of `request` on `span`.
pub(crate) fn record_request(
    span: &Span,
    operation: &str,
    provider: &BoxLlmProvider,
    request: &CompletionRequest,
) {
    let model = if request.model.is_empty() {
        provider.model()
    } else {
        request.model.as_str()
    };

    span.record(GEN_AI_OPERATION_NAME, operation);
    span.record(GEN_AI_PROVIDER_NAME, provider.name());
    span.record(GEN_AI_REQUEST_MODEL, model);
    span.record(GEN_AI_REQUEST_MAX_TOKENS, request.max_tokens);
    if let Some(temperature) = request.temperature {
        span.record(GEN_AI_REQUEST_TEMPERATURE, temperature);
    }
    if let Some(top_p) = request.top_p {
        span.record(GEN_AI_REQUEST_TOP_P, top_p);
    }
}
