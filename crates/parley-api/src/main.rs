//! Parley entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, loads configuration, probes the engine once, then
//! either runs the interactive console chat or serves the HTTP API.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;

use cli::Cli;
use parley_infra::config::{load_config, load_system_prompt};
use parley_infra::llm::create_provider;
use parley_observe::tracing_setup::{init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let mut config = load_config(&cli.config).await;
    cli.apply_overrides(&mut config);
    let system_prompt = load_system_prompt(&config.system_prompt_path).await;

    let model = cli.model.model_id();
    tracing::info!(preset = %cli.model, model, "Using model preset");
    let provider = create_provider(&config.engine, model);
    let state = AppState::init(&config, provider, system_prompt).await;

    let result = if cli.web_mode {
        serve(state, &config).await
    } else {
        cli::chat::loop_runner::run_chat_loop(&state).await
    };

    shutdown_tracing();
    result
}

async fn serve(state: AppState, config: &parley_types::config::AppConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    println!(
        "  {} Parley API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());
    tracing::info!(
        %addr,
        lock_policy = %state.chat_service.store().policy(),
        "HTTP server started"
    );

    let router = http::router::build_router(state, &config.server.web_dir);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
