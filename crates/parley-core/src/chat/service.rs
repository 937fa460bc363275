//! Chat service: the session-level facade shared by the HTTP layer.
//!
//! ChatService ties the SessionStore and the TurnProcessor together so a
//! caller only deals in session ids and prompt strings.

use tracing::{Instrument, field, info, info_span};

use parley_observe::genai_attrs::GEN_AI_CONVERSATION_ID;
use parley_types::chat::{Message, SessionId, SystemRoleSupport};
use parley_types::error::ChatError;

use super::store::SessionStore;
use super::turn::{TurnProcessor, validate_prompt};

pub struct ChatService {
    store: SessionStore,
    processor: TurnProcessor,
    default_system_prompt: String,
}

impl ChatService {
    pub fn new(
        store: SessionStore,
        processor: TurnProcessor,
        default_system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            store,
            processor,
            default_system_prompt: default_system_prompt.into(),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn processor(&self) -> &TurnProcessor {
        &self.processor
    }

    pub fn system_role(&self) -> SystemRoleSupport {
        self.store.factory().system_role()
    }

    /// System prompt used when a reset request does not bring its own.
    pub fn default_system_prompt(&self) -> &str {
        &self.default_system_prompt
    }

    /// Start a new session. `None` uses the default system prompt.
    pub async fn create_session(&self, system_prompt: Option<&str>) -> SessionId {
        let prompt = system_prompt.unwrap_or(&self.default_system_prompt);
        self.store.create_session(prompt).await
    }

    /// Run one turn on a session and return the reply.
    ///
    /// Prompt validation happens before the session lookup, so a blank prompt
    /// on an unknown id reports `InvalidPrompt`.
    pub async fn chat(&self, id: &SessionId, prompt: &str) -> Result<String, ChatError> {
        validate_prompt(prompt)?;

        let span = info_span!("chat_turn", gen_ai.conversation.id = field::Empty);
        span.record(GEN_AI_CONVERSATION_ID, field::display(id));

        async {
            let mut session = self.store.lock_session(id).await?;
            let reply = self.processor.process_turn(&mut session, prompt).await?;
            info!(history_len = session.len(), "Chat turn completed");
            Ok::<_, ChatError>(reply)
        }
        .instrument(span)
        .await
    }

    /// Cloned history of a session.
    pub async fn history(&self, id: &SessionId) -> Result<Vec<Message>, ChatError> {
        self.store.snapshot(id).await
    }
}
