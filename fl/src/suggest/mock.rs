//! Offline suggester

use async_trait::async_trait;
use tracing::debug;

use super::{SuggestedStep, Suggester};

/// Deterministic suggester used when no API key is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSuggester;

#[async_trait]
impl Suggester for MockSuggester {
    async fn break_down(&self, title: &str, _description: &str) -> Vec<SuggestedStep> {
        debug!(%title, "MockSuggester::break_down: called");
        vec![
            SuggestedStep::new(format!("Step 1 for {}", title), "First step"),
            SuggestedStep::new(format!("Step 2 for {}", title), "Second step"),
        ]
    }

    async fn resolve_block(&self, title: &str, reason: &str, _language: &str) -> Vec<SuggestedStep> {
        debug!(%title, %reason, "MockSuggester::resolve_block: called");
        vec![
            SuggestedStep::new(format!("Address: {}", reason), "First step to unblock"),
            SuggestedStep::new("Continue task", "Resume original work"),
        ]
    }
}
