//! Configuration loading for Parley.
//!
//! Reads `parley.toml` into [`AppConfig`] and the default system prompt from
//! its own file. Both fall back to defaults when the file is missing or
//! unreadable, so startup never fails on configuration.

use std::path::Path;

use parley_types::config::{AppConfig, DEFAULT_SYSTEM_PROMPT};

/// Load configuration from `path`.
///
/// - Missing file: [`AppConfig::default()`].
/// - Unreadable or malformed file: logs a warning and returns the default.
pub async fn load_config(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Load the default system prompt from `path`, trimmed.
///
/// A missing, unreadable or blank file yields [`DEFAULT_SYSTEM_PROMPT`].
pub async fn load_system_prompt(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(content) if !content.trim().is_empty() => content.trim().to_string(),
        Ok(_) => {
            tracing::warn!("{} is empty, using default system prompt", path.display());
            DEFAULT_SYSTEM_PROMPT.to_string()
        }
        Err(err) => {
            tracing::warn!(
                "Cannot read system prompt from {}: {err}, using default",
                path.display()
            );
            DEFAULT_SYSTEM_PROMPT.to_string()
        }
    }
}
