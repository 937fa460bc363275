//! OpenTelemetry GenAI semantic convention attribute names.
//!
//! Span fields declared with `tracing::info_span!` use the same dotted names
//! literally; these constants are for `Span::record` once a value is known.
//!
//! Span naming: `"{operation} {model}"` (e.g. `"chat mistralai/Mistral-7B-Instruct-v0.2"`).

/// The name of the operation being performed (e.g. "chat").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the engine client (e.g. "openai_compatible").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";
pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";
pub const GEN_AI_REQUEST_TOP_P: &str = "gen_ai.request.top_p";
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// Why generation stopped (e.g. "end_turn", "max_tokens").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

/// Response id assigned by the engine.
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

/// Session the turn belongs to. Not an OTel convention; kept under the
/// same prefix so turn spans group together.
pub const GEN_AI_CONVERSATION_ID: &str = "gen_ai.conversation.id";

/// Chat completion operation.
pub const OP_CHAT: &str = "chat";

/// One-time system-role capability probe.
pub const OP_PROBE: &str = "probe";
