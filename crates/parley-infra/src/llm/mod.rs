//! Engine client implementations.
//!
//! Contains the concrete [`LlmProvider`](parley_core::llm::provider::LlmProvider)
//! used in production and a factory ([`create_provider`]) that builds it from
//! the `[engine]` config section.

pub mod openai_compat;

use tracing::info;

use parley_core::llm::box_provider::BoxLlmProvider;
use parley_types::config::EngineConfig;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{OpenAiCompatConfig, resolve_api_key};

/// Create the engine client for `preset_model` from the engine config.
///
/// The API key comes from the environment variable named by
/// `engine.api_key_env`.
pub fn create_provider(engine: &EngineConfig, preset_model: &str) -> BoxLlmProvider {
    let api_key = resolve_api_key(&engine.api_key_env);
    let config = OpenAiCompatConfig::from_engine(engine, preset_model, api_key);
    info!(
        base_url = %config.base_url,
        model = %config.model,
        "Engine client configured"
    );
    BoxLlmProvider::new(OpenAiCompatibleProvider::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_uses_preset() {
        let provider = create_provider(&EngineConfig::default(), "microsoft/Phi-3-mini-4k-instruct");
        assert_eq!(provider.name(), "openai_compatible");
        assert_eq!(provider.model(), "microsoft/Phi-3-mini-4k-instruct");
    }

    #[test]
    fn test_create_provider_with_model_override() {
        let engine = EngineConfig {
            base_url: "http://gpu-box:8080/v1".to_string(),
            model: Some("my-org/custom-instruct".to_string()),
            ..EngineConfig::default()
        };
        let provider = create_provider(&engine, "google/gemma-2b-it");
        assert_eq!(provider.model(), "my-org/custom-instruct");
    }
}
