//! Console chat loop.
//!
//! The loop owns its conversation as a local value, bootstrapped from the
//! default system prompt with the same factory the HTTP sessions use. Engine
//! failures are reported and the loop keeps going; the unanswered user
//! message stays in the history, as it does over HTTP.

use std::io::Write;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use parley_core::chat::turn::TurnProcessor;
use parley_types::chat::Conversation;
use parley_types::error::ChatError;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::input::{ChatInput, InputEvent};

const PROMPT: &str = "> ";

/// What a single input line produced.
#[derive(Debug)]
pub enum LineOutcome {
    /// Blank line, nothing sent.
    Skipped,
    Reply(String),
    Failed(ChatError),
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run one input line against the loop's conversation.
pub async fn handle_line(
    processor: &TurnProcessor,
    conversation: &mut Conversation,
    line: &str,
) -> LineOutcome {
    if line.trim().is_empty() {
        return LineOutcome::Skipped;
    }

    let spinner = thinking_spinner();
    let result = processor.process_turn(conversation, line).await;
    spinner.finish_and_clear();

    match result {
        Ok(reply) => LineOutcome::Reply(reply),
        Err(e) => {
            warn!(error = %e, "Console turn failed");
            LineOutcome::Failed(e)
        }
    }
}

/// Run the interactive chat until Ctrl-D or Ctrl-C.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let service = &state.chat_service;
    let processor = service.processor();
    let mut conversation = service
        .store()
        .factory()
        .create(service.default_system_prompt());

    print_welcome_banner(processor.provider().model(), service.system_role());
    println!("Starting chat. Press Ctrl-D to exit.");

    let (mut chat_input, mut writer) = ChatInput::new(PROMPT.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof | InputEvent::Interrupted => {
                writeln!(writer, "Chat closed!")?;
                break;
            }
            InputEvent::Message(text) => {
                match handle_line(processor, &mut conversation, &text).await {
                    LineOutcome::Skipped => {}
                    LineOutcome::Reply(reply) => {
                        writeln!(writer, "{}", style(format!("< {reply}")).green())?;
                    }
                    LineOutcome::Failed(e) => {
                        writeln!(writer, "{} {e}", style("!").red().bold())?;
                    }
                }
            }
        }
    }

    chat_input.flush();
    info!(history_len = conversation.len(), "Console chat ended");
    Ok(())
}
