//! LLM request/response types for Parley.
//!
//! These types model the data shapes exchanged with the generation engine:
//! chat messages, completion requests and responses, and engine errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in an LLM conversation.
///
/// Fields are private so a message cannot change after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: MessageRole,
    content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Request to the generation engine for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model id; empty means "the provider's configured model".
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// Response from the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

/// Reason why the engine stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    ContentFilter,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndTurn => write!(f, "end_turn"),
            StopReason::MaxTokens => write!(f, "max_tokens"),
            StopReason::ContentFilter => write!(f, "content_filter"),
        }
    }
}

/// Token usage reported by the engine for one completion.
///
/// Only recorded on tracing spans; nothing accumulates it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from generation engine operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("context length exceeded")]
    ContextLengthExceeded,

    #[error("engine unavailable: {0}")]
    Unavailable(String),
}

impl LlmError {
    /// Whether the engine received the request and refused it.
    ///
    /// A chat template that cannot render a message list surfaces this way.
    /// Everything else means the engine could not be reached or used at all.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LlmError::Provider { .. }
                | LlmError::InvalidRequest(_)
                | LlmError::ContextLengthExceeded
        )
    }
}

/// Named model choices offered on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelPreset {
    Mistral,
    MetaLlama,
    Phi,
    Gemma,
    Gemma2,
}

impl ModelPreset {
    /// Hugging Face model id served by the engine for this preset.
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelPreset::Mistral => "mistralai/Mistral-7B-Instruct-v0.2",
            ModelPreset::MetaLlama => "meta-llama/Meta-Llama-3-8B-Instruct",
            ModelPreset::Phi => "microsoft/Phi-3-mini-4k-instruct",
            ModelPreset::Gemma => "google/gemma-2b-it",
            ModelPreset::Gemma2 => "google/gemma-2-2b-it",
        }
    }
}

impl fmt::Display for ModelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelPreset::Mistral => write!(f, "mistral"),
            ModelPreset::MetaLlama => write!(f, "meta-llama"),
            ModelPreset::Phi => write!(f, "phi"),
            ModelPreset::Gemma => write!(f, "gemma"),
            ModelPreset::Gemma2 => write!(f, "gemma2"),
        }
    }
}

impl FromStr for ModelPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mistral" => Ok(ModelPreset::Mistral),
            "meta-llama" => Ok(ModelPreset::MetaLlama),
            "phi" => Ok(ModelPreset::Phi),
            "gemma" => Ok(ModelPreset::Gemma),
            "gemma2" => Ok(ModelPreset::Gemma2),
            other => Err(format!(
                "invalid model preset: '{other}' (expected one of: mistral, meta-llama, phi, gemma, gemma2)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_display() {
        assert_eq!(MessageRole::System.to_string(), "system");
        assert_eq!(MessageRole::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_message_serde_uses_lowercase_roles() {
        let msg = Message::assistant("affirmative");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"affirmative"}"#);
    }

    #[test]
    fn test_message_constructors() {
        let msg = Message::system("Be terse.");
        assert_eq!(msg.role(), MessageRole::System);
        assert_eq!(msg.content(), "Be terse.");
        assert_eq!(Message::user("hi").role(), MessageRole::User);
    }

    #[test]
    fn test_llm_error_rejection_classification() {
        assert!(LlmError::InvalidRequest("bad template".into()).is_rejection());
        assert!(LlmError::Provider { message: "roles must alternate".into() }.is_rejection());
        assert!(!LlmError::Unavailable("connection refused".into()).is_rejection());
        assert!(!LlmError::AuthenticationFailed.is_rejection());
        assert!(!LlmError::RateLimited { retry_after_ms: None }.is_rejection());
    }

    #[test]
    fn test_model_preset_roundtrip() {
        for preset in [
            ModelPreset::Mistral,
            ModelPreset::MetaLlama,
            ModelPreset::Phi,
            ModelPreset::Gemma,
            ModelPreset::Gemma2,
        ] {
            let parsed: ModelPreset = preset.to_string().parse().unwrap();
            assert_eq!(preset, parsed);
        }
    }

    #[test]
    fn test_model_preset_ids() {
        assert_eq!(ModelPreset::Phi.model_id(), "microsoft/Phi-3-mini-4k-instruct");
        assert_eq!(ModelPreset::Gemma2.model_id(), "google/gemma-2-2b-it");
        assert!("llama".parse::<ModelPreset>().is_err());
    }
}
