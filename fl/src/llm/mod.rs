//! LLM client module
//!
//! A minimal chat-completions client used by the step suggester.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, ResponseFormat, StopReason, TokenUsage};

use crate::config::LlmConfig;

/// Create an LLM client from config
///
/// Fails with `LlmError::MissingApiKey` when no credential is configured.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(model = %config.model, base_url = %config.base_url, "create_client: called");
    let api_key = config.resolve_api_key().ok_or(LlmError::MissingApiKey)?;
    Ok(Arc::new(OpenAIClient::new(config, api_key)?))
}
