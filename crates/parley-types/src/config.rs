//! Configuration types for Parley.
//!
//! `AppConfig` represents the top-level `parley.toml` that controls the engine
//! endpoint, sampling parameters, and the HTTP server. All fields have defaults
//! so an empty or missing file is a valid configuration.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// System prompt used when the prompt file is missing.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Top-level configuration for the Parley front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub generation: GenerationParams,

    #[serde(default)]
    pub server: ServerConfig,

    /// File holding the default system prompt.
    #[serde(default = "default_system_prompt_path")]
    pub system_prompt_path: PathBuf,
}

fn default_system_prompt_path() -> PathBuf {
    PathBuf::from(".system_prompt")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            generation: GenerationParams::default(),
            server: ServerConfig::default(),
            system_prompt_path: default_system_prompt_path(),
        }
    }
}

/// Where and how to reach the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the OpenAI-compatible chat completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Explicit model id; overrides the command-line preset when set.
    #[serde(default)]
    pub model: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000/v1".to_string()
}

fn default_api_key_env() -> String {
    "PARLEY_API_KEY".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            model: None,
        }
    }
}

/// Sampling parameters sent with every chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Nucleus sampling threshold.
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Output token cap for a chat turn.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Output token cap for the startup capability probe.
    #[serde(default = "default_probe_max_tokens")]
    pub probe_max_tokens: u32,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_p() -> f64 {
    0.9
}

fn default_max_tokens() -> u32 {
    256
}

fn default_probe_max_tokens() -> u32 {
    2
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            probe_max_tokens: default_probe_max_tokens(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served as static files next to the API.
    #[serde(default = "default_web_dir")]
    pub web_dir: PathBuf,

    #[serde(default)]
    pub lock_policy: LockPolicy,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_web_dir() -> PathBuf {
    PathBuf::from("webroot")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: default_web_dir(),
            lock_policy: LockPolicy::default(),
        }
    }
}

/// How session mutations are serialized.
///
/// `Global` holds one process-wide lock for every create and every turn,
/// including the whole generation call. `PerSession` only serializes turns
/// that target the same session and must be opted into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockPolicy {
    #[default]
    Global,
    PerSession,
}

impl fmt::Display for LockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockPolicy::Global => write!(f, "global"),
            LockPolicy::PerSession => write!(f, "per_session"),
        }
    }
}
