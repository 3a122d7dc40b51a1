//! Step suggestions
//!
//! The `Suggester` capability turns a task (or a blocker on a task) into a
//! short list of concrete steps. Failures never reach the caller: they are
//! logged and produce an empty list.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::NewTask;
use crate::llm::{self, LlmError};

mod llm_suggester;
mod mock;
mod parse;
pub mod prompts;

pub use llm_suggester::LlmSuggester;
pub use mock::MockSuggester;
pub use parse::parse_steps;

/// One suggested step, not yet a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedStep {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl SuggestedStep {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl From<SuggestedStep> for NewTask {
    fn from(step: SuggestedStep) -> Self {
        NewTask::new(step.title).with_description(step.description)
    }
}

/// Produces steps for a task
#[async_trait]
pub trait Suggester: Send + Sync {
    /// Split a task into smaller steps
    async fn break_down(&self, title: &str, description: &str) -> Vec<SuggestedStep>;

    /// Suggest steps that get the user past `reason`, phrased in `language`
    async fn resolve_block(&self, title: &str, reason: &str, language: &str) -> Vec<SuggestedStep>;
}

/// Build the suggester the configuration asks for
///
/// With a usable API key this is the LLM-backed suggester; otherwise the
/// deterministic offline mock.
pub fn create_suggester(config: &Config) -> Arc<dyn Suggester> {
    debug!("create_suggester: called");
    match llm::create_client(&config.llm) {
        Ok(client) => {
            info!(model = %config.llm.model, "Using LLM suggester");
            Arc::new(LlmSuggester::new(client, config.llm.max_tokens))
        }
        Err(LlmError::MissingApiKey) => {
            info!(api_key_env = %config.llm.api_key_env, "No API key configured, using offline suggester");
            Arc::new(MockSuggester)
        }
        Err(e) => {
            warn!(error = %e, "Failed to create LLM client, using offline suggester");
            Arc::new(MockSuggester)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;

    #[test]
    fn test_step_into_new_task() {
        let task: NewTask = SuggestedStep::new("Open laptop", "Just open it").into();
        assert_eq!(task.title, "Open laptop");
        assert_eq!(task.description, "Just open it");
        assert!(task.parent_id.is_none());
    }

    #[tokio::test]
    async fn test_create_suggester_without_key_is_offline() {
        let config = Config {
            llm: LlmConfig {
                api_key: None,
                api_key_env: "FRONTALLOBE_UNSET_KEY_FOR_TESTS".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let suggester = create_suggester(&config);
        let steps = suggester.break_down("Laundry", "").await;
        assert_eq!(steps[0].title, "Step 1 for Laundry");
    }
}
