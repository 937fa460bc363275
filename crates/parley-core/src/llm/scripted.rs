//! Scripted in-memory provider used by the core's unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use parley_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, StopReason, Usage,
};

use super::provider::LlmProvider;

/// Shared view into what a `ScriptedProvider` saw after it was boxed.
#[derive(Clone, Default)]
pub struct ScriptedHandle {
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl ScriptedHandle {
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Highest number of `complete` calls that were running at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

/// Provider that pops queued outcomes, then echoes the last user message.
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Result<String, LlmError>>>,
    delay: Option<Duration>,
    handle: ScriptedHandle,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            delay: None,
            handle: ScriptedHandle::default(),
        }
    }

    pub fn reply(self, text: &str) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, err: LlmError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn handle(&self) -> ScriptedHandle {
        self.handle.clone()
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.handle.requests.lock().unwrap().push(request.clone());

        let now = self.handle.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.handle.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.handle.in_flight.fetch_sub(1, Ordering::SeqCst);

        let outcome = self.outcomes.lock().unwrap().pop_front();
        let content = match outcome {
            Some(result) => result?,
            None => {
                let last_user = request
                    .messages
                    .iter()
                    .rev()
                    .find(|m| m.role() == MessageRole::User)
                    .map(|m| m.content().to_string())
                    .unwrap_or_default();
                format!("re: {last_user}")
            }
        };

        Ok(CompletionResponse {
            id: format!("scripted-{}", self.handle.call_count()),
            content,
            model: self.model().to_string(),
            stop_reason: StopReason::EndTurn,
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
            },
        })
    }
}
