//! One-time detection of system-role support in the engine's chat template.
//!
//! Some instruction-tuned models ship a chat template with no system slot and
//! reject any message list that contains one. The probe sends the smallest
//! such list and classifies the outcome:
//!
//! - the call succeeds -> [`SystemRoleSupport::Supported`]
//! - the engine rejects the request -> [`SystemRoleSupport::Unsupported`]
//! - the engine cannot be reached or used -> [`ProbeError::EngineUnavailable`]
//!
//! [`resolve_system_role_support`] collapses the error case to `Unsupported`
//! so startup never fails on the probe.

use tracing::{Instrument, debug, field, info, info_span, warn};

use parley_observe::genai_attrs::OP_PROBE;
use parley_types::chat::SystemRoleSupport;
use parley_types::error::ProbeError;
use parley_types::llm::{CompletionRequest, Message};

use super::box_provider::BoxLlmProvider;
use super::span::record_request;

/// System message content sent by the probe.
pub const PROBE_SYSTEM_CONTENT: &str = "test";

/// User message content sent by the probe.
pub const PROBE_USER_CONTENT: &str = "hi";

/// Send the two-message probe through the engine and classify the outcome.
pub async fn probe_system_role(
    provider: &BoxLlmProvider,
    max_tokens: u32,
) -> Result<SystemRoleSupport, ProbeError> {
    let request = CompletionRequest {
        model: String::new(),
        messages: vec![
            Message::system(PROBE_SYSTEM_CONTENT),
            Message::user(PROBE_USER_CONTENT),
        ],
        max_tokens,
        temperature: None,
        top_p: None,
    };

    let span = info_span!(
        "gen_ai.probe",
        otel.name = %format!("{OP_PROBE} {}", provider.model()),
        gen_ai.operation.name = field::Empty,
        gen_ai.provider.name = field::Empty,
        gen_ai.request.model = field::Empty,
        gen_ai.request.max_tokens = field::Empty,
    );
    record_request(&span, OP_PROBE, provider, &request);

    match provider.complete(&request).instrument(span).await {
        Ok(_) => Ok(SystemRoleSupport::Supported),
        Err(e) if e.is_rejection() => {
            debug!(error = %e, "System role test failed");
            Ok(SystemRoleSupport::Unsupported)
        }
        Err(e) => Err(ProbeError::EngineUnavailable(e)),
    }
}

/// Run the probe once at startup, never failing.
///
/// An unavailable engine is indistinguishable from a template without a system
/// slot as far as the conversation bootstrap is concerned, so it degrades to
/// `Unsupported` with a warning.
pub async fn resolve_system_role_support(
    provider: &BoxLlmProvider,
    max_tokens: u32,
) -> SystemRoleSupport {
    let support = match probe_system_role(provider, max_tokens).await {
        Ok(support) => support,
        Err(e) => {
            warn!(error = %e, "Capability probe could not reach the engine, assuming no system role");
            SystemRoleSupport::Unsupported
        }
    };
    info!(model = provider.model(), system_role = %support, "Capability probe finished");
    support
}
