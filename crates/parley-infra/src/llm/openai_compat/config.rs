//! Connection settings for an OpenAI-compatible inference server.

use secrecy::SecretString;
use tracing::debug;

use parley_types::config::EngineConfig;

/// Key sent when the configured environment variable is unset. Local
/// inference servers ignore it.
pub const PLACEHOLDER_API_KEY: &str = "EMPTY";

/// Settings used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Name reported in logs and spans.
    pub provider_name: String,
    /// Base URL for the API (e.g. "http://localhost:8000/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model id sent with every request.
    pub model: String,
}

impl OpenAiCompatConfig {
    /// Build from the `[engine]` config section.
    ///
    /// `engine.model` wins over `preset_model` when set.
    pub fn from_engine(engine: &EngineConfig, preset_model: &str, api_key: SecretString) -> Self {
        Self {
            provider_name: "openai_compatible".into(),
            base_url: engine.base_url.clone(),
            api_key,
            model: engine
                .model
                .clone()
                .unwrap_or_else(|| preset_model.to_string()),
        }
    }
}

/// Read the API key from the environment variable `env_var`.
pub fn resolve_api_key(env_var: &str) -> SecretString {
    match std::env::var(env_var) {
        Ok(key) if !key.is_empty() => SecretString::from(key),
        _ => {
            debug!(env_var, "No API key in environment, sending placeholder");
            SecretString::from(PLACEHOLDER_API_KEY.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn preset_model_used_without_override() {
        let engine = EngineConfig::default();
        let config = OpenAiCompatConfig::from_engine(
            &engine,
            "mistralai/Mistral-7B-Instruct-v0.2",
            SecretString::from("k".to_string()),
        );
        assert_eq!(config.base_url, "http://localhost:8000/v1");
        assert_eq!(config.model, "mistralai/Mistral-7B-Instruct-v0.2");
        assert_eq!(config.provider_name, "openai_compatible");
    }

    #[test]
    fn config_model_overrides_preset() {
        let engine = EngineConfig {
            model: Some("my-org/custom".to_string()),
            ..EngineConfig::default()
        };
        let config = OpenAiCompatConfig::from_engine(
            &engine,
            "google/gemma-2b-it",
            SecretString::from("k".to_string()),
        );
        assert_eq!(config.model, "my-org/custom");
    }

    #[test]
    fn unset_env_var_yields_placeholder() {
        let key = resolve_api_key("PARLEY_TEST_KEY_THAT_IS_NEVER_SET");
        assert_eq!(key.expose_secret(), PLACEHOLDER_API_KEY);
    }
}
