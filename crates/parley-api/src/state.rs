//! Application state wiring the engine, the probe result and the session
//! store together.
//!
//! Both the HTTP server and the interactive loop are built from one
//! `AppState`, so they share a single probe run and configuration.

use std::sync::Arc;

use parley_core::chat::factory::ConversationFactory;
use parley_core::chat::service::ChatService;
use parley_core::chat::store::SessionStore;
use parley_core::chat::turn::TurnProcessor;
use parley_core::llm::box_provider::BoxLlmProvider;
use parley_core::llm::probe::resolve_system_role_support;
use parley_types::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
}

impl AppState {
    pub fn new(chat_service: Arc<ChatService>) -> Self {
        Self { chat_service }
    }

    /// Probe the engine once, then wire the session store and turn processor.
    pub async fn init(
        config: &AppConfig,
        provider: BoxLlmProvider,
        default_system_prompt: String,
    ) -> Self {
        let provider = Arc::new(provider);
        let system_role =
            resolve_system_role_support(&provider, config.generation.probe_max_tokens).await;

        let store = SessionStore::new(
            ConversationFactory::new(system_role),
            config.server.lock_policy,
        );
        let processor = TurnProcessor::new(provider, config.generation.clone());

        Self::new(Arc::new(ChatService::new(
            store,
            processor,
            default_system_prompt,
        )))
    }
}
