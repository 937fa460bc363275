//! One prompt/reply exchange against a conversation.
//!
//! `TurnProcessor` only ever sees a `&mut Conversation`, so exclusive access is
//! the caller's job (a `SessionGuard` or a loop-local value).

use std::sync::Arc;

use tracing::{Instrument, Span, debug, field, info_span, warn};

use parley_observe::genai_attrs::{
    GEN_AI_RESPONSE_FINISH_REASONS, GEN_AI_RESPONSE_ID, GEN_AI_USAGE_INPUT_TOKENS,
    GEN_AI_USAGE_OUTPUT_TOKENS, OP_CHAT,
};
use parley_types::chat::Conversation;
use parley_types::config::GenerationParams;
use parley_types::error::ChatError;
use parley_types::llm::{CompletionRequest, CompletionResponse};

use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::span::record_request;

/// Runs chat turns through the engine with fixed sampling parameters.
#[derive(Clone)]
pub struct TurnProcessor {
    provider: Arc<BoxLlmProvider>,
    params: GenerationParams,
}

impl TurnProcessor {
    pub fn new(provider: Arc<BoxLlmProvider>, params: GenerationParams) -> Self {
        Self { provider, params }
    }

    pub fn provider(&self) -> &BoxLlmProvider {
        &self.provider
    }

    fn build_request(&self, conversation: &Conversation) -> CompletionRequest {
        CompletionRequest {
            model: String::new(),
            messages: conversation.messages().to_vec(),
            max_tokens: self.params.max_tokens,
            temperature: Some(self.params.temperature),
            top_p: Some(self.params.top_p),
        }
    }

    /// Append `user_prompt`, generate a reply from the whole history and
    /// append it.
    ///
    /// A blank prompt is rejected before anything is appended. When the engine
    /// fails the user message stays in place and the error is returned.
    pub async fn process_turn(
        &self,
        conversation: &mut Conversation,
        user_prompt: &str,
    ) -> Result<String, ChatError> {
        validate_prompt(user_prompt)?;

        conversation.push_user(user_prompt);
        let request = self.build_request(conversation);

        let span = info_span!(
            "gen_ai.chat",
            otel.name = %format!("{OP_CHAT} {}", self.provider.model()),
            gen_ai.operation.name = field::Empty,
            gen_ai.provider.name = field::Empty,
            gen_ai.request.model = field::Empty,
            gen_ai.request.max_tokens = field::Empty,
            gen_ai.request.temperature = field::Empty,
            gen_ai.request.top_p = field::Empty,
            history_len = request.messages.len(),
            gen_ai.response.id = field::Empty,
            gen_ai.response.finish_reasons = field::Empty,
            gen_ai.usage.input_tokens = field::Empty,
            gen_ai.usage.output_tokens = field::Empty,
        );
        record_request(&span, OP_CHAT, &self.provider, &request);

        let result = self
            .provider
            .complete(&request)
            .instrument(span.clone())
            .await;

        match result {
            Ok(response) => {
                record_response(&span, &response);
                debug!(
                    reply_len = response.content.len(),
                    stop_reason = %response.stop_reason,
                    "Turn completed"
                );
                conversation.push_assistant(response.content.clone());
                Ok(response.content)
            }
            Err(e) => {
                warn!(error = %e, history_len = conversation.len(), "Generation failed, user message kept");
                Err(ChatError::EngineFailure(e))
            }
        }
    }
}

/// Reject prompts that are empty once whitespace is trimmed.
pub fn validate_prompt(user_prompt: &str) -> Result<(), ChatError> {
    if user_prompt.trim().is_empty() {
        return Err(ChatError::InvalidPrompt(
            "prompt must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn record_response(span: &Span, response: &CompletionResponse) {
    span.record(GEN_AI_RESPONSE_ID, response.id.as_str());
    span.record(
        GEN_AI_RESPONSE_FINISH_REASONS,
        field::display(&response.stop_reason),
    );
    span.record(GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
    span.record(GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::factory::ConversationFactory;
    use crate::llm::scripted::ScriptedProvider;
    use crate::test_support::SpanCapture;
    use parley_types::chat::{Message, MessageRole, SystemRoleSupport};
    use parley_types::llm::LlmError;

    fn processor(scripted: ScriptedProvider) -> TurnProcessor {
        TurnProcessor::new(
            Arc::new(BoxLlmProvider::new(scripted)),
            GenerationParams::default(),
        )
    }

    #[tokio::test]
    async fn terse_scenario() {
        let scripted = ScriptedProvider::new().reply("Hi.");
        let handle = scripted.handle();
        let processor = processor(scripted);
        let mut conv = ConversationFactory::new(SystemRoleSupport::Supported).create("Be terse.");

        let reply = processor.process_turn(&mut conv, "Hello").await.unwrap();

        assert_eq!(reply, "Hi.");
        assert_eq!(
            conv.messages(),
            &[
                Message::system("Be terse."),
                Message::user("Hello"),
                Message::assistant("Hi."),
            ]
        );

        let requests = handle.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].messages,
            vec![Message::system("Be terse."), Message::user("Hello")]
        );
        assert_eq!(requests[0].max_tokens, 256);
        assert_eq!(requests[0].temperature, Some(0.7));
        assert_eq!(requests[0].top_p, Some(0.9));
    }

    #[tokio::test]
    async fn successful_turns_interleave_after_bootstrap() {
        let processor = processor(ScriptedProvider::new());
        let mut conv = ConversationFactory::new(SystemRoleSupport::Unsupported).create("sys");

        for prompt in ["one", "two", "three"] {
            processor.process_turn(&mut conv, prompt).await.unwrap();
        }

        let messages = conv.messages();
        assert_eq!(messages.len(), 2 + 6);
        for (i, pair) in messages[2..].chunks(2).enumerate() {
            assert_eq!(pair[0].role(), MessageRole::User);
            assert_eq!(pair[1].role(), MessageRole::Assistant);
            assert_eq!(pair[1].content(), format!("re: {}", pair[0].content()));
            assert_eq!(pair[0].content(), ["one", "two", "three"][i]);
        }
    }

    #[tokio::test]
    async fn failure_keeps_user_message_and_later_turn_appends() {
        let scripted = ScriptedProvider::new()
            .fail(LlmError::Unavailable("engine down".to_string()))
            .reply("back");
        let handle = scripted.handle();
        let processor = processor(scripted);
        let mut conv = ConversationFactory::new(SystemRoleSupport::Supported).create("sys");

        let err = processor.process_turn(&mut conv, "first").await.unwrap_err();
        assert!(matches!(err, ChatError::EngineFailure(LlmError::Unavailable(_))));
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.last(), Some(&Message::user("first")));

        let reply = processor.process_turn(&mut conv, "second").await.unwrap();
        assert_eq!(reply, "back");
        assert_eq!(
            conv.messages(),
            &[
                Message::system("sys"),
                Message::user("first"),
                Message::user("second"),
                Message::assistant("back"),
            ]
        );
        // The retry carries the dangling user message to the engine.
        assert_eq!(handle.requests()[1].messages.len(), 3);
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_without_mutation() {
        let scripted = ScriptedProvider::new();
        let handle = scripted.handle();
        let processor = processor(scripted);
        let mut conv = ConversationFactory::new(SystemRoleSupport::Supported).create("sys");

        for prompt in ["", "   ", "\n\t"] {
            let err = processor.process_turn(&mut conv, prompt).await.unwrap_err();
            assert!(matches!(err, ChatError::InvalidPrompt(_)));
        }
        assert_eq!(conv.len(), 1);
        assert_eq!(handle.call_count(), 0);
    }

    #[tokio::test]
    async fn prompt_is_stored_untrimmed() {
        let processor = processor(ScriptedProvider::new().reply("ok"));
        let mut conv = ConversationFactory::new(SystemRoleSupport::Supported).create("sys");

        processor.process_turn(&mut conv, "  padded  ").await.unwrap();
        assert_eq!(conv.messages()[1].content(), "  padded  ");
    }

    #[tokio::test]
    async fn chat_span_records_request_attributes() {
        let (capture, _guard) = SpanCapture::install();
        let processor = processor(ScriptedProvider::new().reply("ok"));
        let mut conv = ConversationFactory::new(SystemRoleSupport::Supported).create("sys");

        processor.process_turn(&mut conv, "Hello").await.unwrap();

        let field = |name: &str| capture.value("gen_ai.chat", name);
        assert_eq!(field("gen_ai.operation.name").as_deref(), Some("chat"));
        assert_eq!(field("gen_ai.provider.name").as_deref(), Some("scripted"));
        assert_eq!(field("gen_ai.request.model").as_deref(), Some("scripted-model"));
        assert_eq!(field("gen_ai.request.max_tokens").as_deref(), Some("256"));
        assert_eq!(field("gen_ai.request.temperature").as_deref(), Some("0.7"));
        assert_eq!(field("gen_ai.request.top_p").as_deref(), Some("0.9"));
        assert!(field("gen_ai.usage.input_tokens").is_some());
    }
}
