//! Command line definition for the `parley` binary.
//!
//! Uses clap derive macros. Flags given on the command line override the
//! values read from the config file.

pub mod chat;

use std::path::PathBuf;

use clap::Parser;

use parley_types::config::{AppConfig, LockPolicy};
use parley_types::llm::ModelPreset;

/// Chat with a locally served instruction-tuned model, in the terminal or over HTTP.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about, long_about = None)]
pub struct Cli {
    /// Model preset: mistral, meta-llama, phi, gemma, gemma2.
    #[arg(short, long)]
    pub model: ModelPreset,

    /// Serve the HTTP API instead of the interactive console.
    #[arg(long)]
    pub web_mode: bool,

    /// HTTP port (web mode).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// HTTP bind address (web mode).
    #[arg(long)]
    pub host: Option<String>,

    /// TOML config file.
    #[arg(short, long, default_value = "parley.toml")]
    pub config: PathBuf,

    /// File holding the default system prompt.
    #[arg(long)]
    pub system_prompt_file: Option<PathBuf>,

    /// Base URL of the OpenAI-compatible engine.
    #[arg(long, env = "PARLEY_BASE_URL")]
    pub base_url: Option<String>,

    /// Lock each session on its own instead of behind one process-wide lock.
    #[arg(long)]
    pub per_session_lock: bool,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long)]
    pub otel: bool,

    /// Detailed logs (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Default log directive; `RUST_LOG` overrides it.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Apply command line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.engine.base_url = base_url.clone();
        }
        if let Some(path) = &self.system_prompt_file {
            config.system_prompt_path = path.clone();
        }
        if self.per_session_lock {
            config.server.lock_policy = LockPolicy::PerSession;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_is_required() {
        assert!(Cli::try_parse_from(["parley"]).is_err());
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        assert!(Cli::try_parse_from(["parley", "-m", "gpt-9"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["parley", "--model", "gemma2"]).unwrap();
        assert_eq!(cli.model, ModelPreset::Gemma2);
        assert!(!cli.web_mode);
        assert_eq!(cli.config, PathBuf::from("parley.toml"));
        assert_eq!(cli.log_filter(), "warn");

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.lock_policy, LockPolicy::Global);
    }

    #[test]
    fn test_overrides_win_over_config() {
        let cli = Cli::try_parse_from([
            "parley",
            "-m",
            "mistral",
            "--web-mode",
            "-p",
            "8080",
            "--host",
            "127.0.0.1",
            "--base-url",
            "http://gpu:8000/v1",
            "--system-prompt-file",
            "prompts/pirate.txt",
            "--per-session-lock",
            "-vv",
        ])
        .unwrap();
        assert!(cli.web_mode);
        assert_eq!(cli.log_filter(), "debug");

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.engine.base_url, "http://gpu:8000/v1");
        assert_eq!(config.system_prompt_path, PathBuf::from("prompts/pirate.txt"));
        assert_eq!(config.server.lock_policy, LockPolicy::PerSession);
    }

    #[test]
    fn test_quiet_filter() {
        let cli = Cli::try_parse_from(["parley", "-m", "phi", "-q"]).unwrap();
        assert_eq!(cli.log_filter(), "error");
    }
}
