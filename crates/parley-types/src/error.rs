use thiserror::Error;

use crate::llm::LlmError;

/// Errors from session and turn operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("session '{0}' not found")]
    SessionNotFound(String),

    /// The engine failed mid-turn. The user message stays in the conversation.
    #[error("generation failed: {0}")]
    EngineFailure(#[from] LlmError),
}

/// Errors from the one-time system-role capability probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The engine could not be reached or used, so the probe says nothing
    /// about the chat template.
    #[error("engine unavailable during capability probe: {0}")]
    EngineUnavailable(#[source] LlmError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::SessionNotFound("abc".to_string());
        assert_eq!(err.to_string(), "session 'abc' not found");
    }

    #[test]
    fn test_engine_failure_wraps_llm_error() {
        let err: ChatError = LlmError::Overloaded("busy".to_string()).into();
        assert!(matches!(err, ChatError::EngineFailure(_)));
        assert!(err.to_string().contains("busy"));
    }

    #[test]
    fn test_probe_error_display() {
        let err = ProbeError::EngineUnavailable(LlmError::Unavailable("refused".to_string()));
        assert!(err.to_string().contains("refused"));
    }
}
