//! Conversation bootstrap, shaped by the engine's system-role support.
//!
//! When the chat template has a system slot the system prompt goes there.
//! Otherwise it is sent as a first user turn that the assistant has already
//! acknowledged with [`BOOTSTRAP_ACK`].

use tracing::info;

use parley_types::chat::{Conversation, Message, SystemRoleSupport};

/// Fixed assistant reply that acknowledges a system prompt sent as a user turn.
pub const BOOTSTRAP_ACK: &str = "affirmative";

/// Builds the initial conversation of every session.
#[derive(Debug, Clone, Copy)]
pub struct ConversationFactory {
    system_role: SystemRoleSupport,
}

impl ConversationFactory {
    pub fn new(system_role: SystemRoleSupport) -> Self {
        Self { system_role }
    }

    pub fn system_role(&self) -> SystemRoleSupport {
        self.system_role
    }

    /// Build a fresh conversation for `system_prompt`.
    ///
    /// Never empty; the first message's content is `system_prompt` verbatim.
    pub fn create(&self, system_prompt: &str) -> Conversation {
        let bootstrap = match self.system_role {
            SystemRoleSupport::Supported => vec![Message::system(system_prompt)],
            SystemRoleSupport::Unsupported => {
                info!("System role not supported by chat template, attaching as first user message");
                vec![Message::user(system_prompt), Message::assistant(BOOTSTRAP_ACK)]
            }
        };
        info!(system_prompt = %system_prompt, "Starting new conversation");
        Conversation::from_bootstrap(bootstrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::chat::MessageRole;

    #[test]
    fn supported_bootstrap_is_single_system_message() {
        let conv = ConversationFactory::new(SystemRoleSupport::Supported).create("Be terse.");
        assert_eq!(conv.messages(), &[Message::system("Be terse.")]);
    }

    #[test]
    fn unsupported_bootstrap_is_user_then_ack() {
        let conv = ConversationFactory::new(SystemRoleSupport::Unsupported).create("Be terse.");
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.messages()[0], Message::user("Be terse."));
        assert_eq!(conv.messages()[1], Message::assistant("affirmative"));
    }

    #[test]
    fn system_prompt_is_kept_verbatim() {
        let prompt = "  You are a pirate.\nSpeak accordingly.  ";
        for support in [SystemRoleSupport::Supported, SystemRoleSupport::Unsupported] {
            let conv = ConversationFactory::new(support).create(prompt);
            assert!(!conv.is_empty());
            assert_eq!(conv.messages()[0].content(), prompt);
        }
    }

    #[test]
    fn empty_prompt_still_bootstraps() {
        let conv = ConversationFactory::new(SystemRoleSupport::Supported).create("");
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].role(), MessageRole::System);
    }
}
