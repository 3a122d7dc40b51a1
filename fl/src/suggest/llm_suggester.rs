//! LLM-backed suggester

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::llm::{CompletionRequest, LlmClient};

use super::{SuggestedStep, Suggester, parse_steps, prompts};

/// Suggester that asks a chat-completions model for steps
pub struct LlmSuggester {
    llm: Arc<dyn LlmClient>,
    max_tokens: u32,
}

impl LlmSuggester {
    pub fn new(llm: Arc<dyn LlmClient>, max_tokens: u32) -> Self {
        Self { llm, max_tokens }
    }

    async fn ask(&self, system: &str, prompt: String) -> Vec<SuggestedStep> {
        let mut request = CompletionRequest::single_turn(system, prompt).json();
        request.max_tokens = self.max_tokens;

        let response = match self.llm.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, retry_after = ?e.retry_after(), "Suggestion request failed");
                return Vec::new();
            }
        };

        let Some(content) = response.content else {
            warn!(stop_reason = ?response.stop_reason, "Suggestion reply had no content");
            return Vec::new();
        };

        let steps = parse_steps(&content);
        if steps.is_empty() {
            warn!(content_len = content.len(), "Suggestion reply contained no usable steps");
        }
        debug!(count = steps.len(), "ask: parsed steps");
        steps
    }
}

#[async_trait]
impl Suggester for LlmSuggester {
    async fn break_down(&self, title: &str, description: &str) -> Vec<SuggestedStep> {
        debug!(%title, "LlmSuggester::break_down: called");
        self.ask(prompts::BREAK_DOWN_SYSTEM, prompts::break_down(title, description))
            .await
    }

    async fn resolve_block(&self, title: &str, reason: &str, language: &str) -> Vec<SuggestedStep> {
        debug!(%title, %reason, %language, "LlmSuggester::resolve_block: called");
        self.ask(prompts::RESOLVE_BLOCK_SYSTEM, prompts::resolve_block(title, reason, language))
            .await
    }
}
