//! OpenAI API client implementation
//!
//! Implements the LlmClient trait for the Chat Completions API. Any server
//! speaking the same protocol works by pointing `base-url` at it.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, ResponseFormat, StopReason, TokenUsage};
use crate::config::LlmConfig;

/// Maximum number of retries for transient errors
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay for retries
const INITIAL_BACKOFF_MS: u64 = 1000;

/// OpenAI API client
pub struct OpenAIClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl OpenAIClient {
    /// Create a client from config and an already resolved credential
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self, LlmError> {
        debug!(model = %config.model, timeout_ms = config.timeout_ms, "OpenAIClient::new: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Build the request body for the chat-completions endpoint
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(%self.model, %request.max_tokens, "build_request_body: called");

        let messages = serde_json::json!([
            { "role": "system", "content": request.system_prompt },
            { "role": "user", "content": request.user_prompt },
        ]);

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": request.max_tokens.min(self.max_tokens),
        });

        if request.response_format == ResponseFormat::JsonObject {
            body["response_format"] = serde_json::json!({ "type": "json_object" });
        }

        body
    }

    fn parse_response(&self, api_response: OpenAIResponse) -> CompletionResponse {
        let usage = api_response.usage.unwrap_or_default();
        let (content, stop_reason) = match api_response.choices.into_iter().next() {
            Some(choice) => (
                choice.message.content,
                StopReason::from_openai(choice.finish_reason.as_deref()),
            ),
            None => (None, StopReason::EndTurn),
        };

        CompletionResponse {
            content,
            stop_reason,
            usage: TokenUsage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
        }
    }

    /// One POST, with the response mapped to a typed result
    async fn send_once(&self, url: &str, body: &serde_json::Value) -> Result<CompletionResponse, LlmError> {
        let response = self.http.post(url).bearer_auth(&self.api_key).json(body).send().await?;
        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            debug!(retry_after, "send_once: rate limited (429)");
            return Err(LlmError::RateLimited {
                retry_after: Duration::from_secs(retry_after),
            });
        }

        if !response.status().is_success() {
            debug!(%status, "send_once: API error");
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, message });
        }

        let api_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
        Ok(self.parse_response(api_response))
    }
}

/// Whether the client itself should try again
///
/// Rate limits are left to the caller; their waits run far past a short backoff.
fn should_retry(error: &LlmError, attempt: u32) -> bool {
    attempt < MAX_RETRIES && error.is_retryable() && error.retry_after().is_none()
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, %request.max_tokens, "complete: called");
        let url = self.endpoint();
        let body = self.build_request_body(&request);

        let mut attempt = 0;
        loop {
            match self.send_once(&url, &body).await {
                Ok(parsed) => {
                    debug!(
                        input_tokens = parsed.usage.input_tokens,
                        output_tokens = parsed.usage.output_tokens,
                        total_tokens = parsed.usage.total(),
                        "complete: success"
                    );
                    return Ok(parsed);
                }
                Err(e) if should_retry(&e, attempt) => {
                    attempt += 1;
                    let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempt - 1);
                    warn!(attempt, backoff_ms = backoff, error = %e, "complete: retrying after transient error");
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// Chat-completions response types

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAIUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(max_tokens: u32) -> OpenAIClient {
        let config = LlmConfig {
            max_tokens,
            base_url: "https://api.openai.com/v1/".to_string(),
            ..Default::default()
        };
        OpenAIClient::new(&config, "test-key".to_string()).unwrap()
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        assert_eq!(client(1024).endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_build_request_body_basic() {
        let request = CompletionRequest {
            system_prompt: "You are helpful".to_string(),
            user_prompt: "Hello".to_string(),
            response_format: ResponseFormat::Text,
            max_tokens: 500,
        };

        let body = client(1024).build_request_body(&request);

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are helpful");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Hello");
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_json_response_format() {
        let request = CompletionRequest::single_turn("sys", "steps please").json();
        let body = client(1024).build_request_body(&request);
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_max_tokens_capped() {
        let mut request = CompletionRequest::single_turn("Test", "x");
        request.max_tokens = 5000;
        let body = client(1000).build_request_body(&request);
        assert_eq!(body["max_tokens"], 1000);
    }

    #[test]
    fn test_parse_response() {
        let raw = r#"{
            "choices": [{"message": {"role": "assistant", "content": "{\"steps\": []}"}, "finish_reason": "length"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 34}
        }"#;
        let api: OpenAIResponse = serde_json::from_str(raw).unwrap();
        let parsed = client(1024).parse_response(api);
        assert_eq!(parsed.content.as_deref(), Some("{\"steps\": []}"));
        assert_eq!(parsed.stop_reason, StopReason::MaxTokens);
        assert_eq!(parsed.usage.total(), 46);
    }

    #[test]
    fn test_parse_response_without_choices() {
        let api: OpenAIResponse = serde_json::from_str("{}").unwrap();
        let parsed = client(1024).parse_response(api);
        assert!(parsed.content.is_none());
        assert_eq!(parsed.usage, TokenUsage::default());
    }

    fn api(status: u16) -> LlmError {
        LlmError::ApiError {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_should_retry_transient_errors() {
        assert!(should_retry(&api(503), 0));
        assert!(should_retry(&api(408), 2));
        assert!(!should_retry(&api(503), MAX_RETRIES));
    }

    #[test]
    fn test_should_not_retry_terminal_or_rate_limited() {
        assert!(!should_retry(&api(400), 0));
        assert!(!should_retry(&api(401), 0));
        assert!(!should_retry(&LlmError::InvalidResponse("bad json".to_string()), 0));
        let limited = LlmError::RateLimited {
            retry_after: Duration::from_secs(30),
        };
        assert!(!should_retry(&limited, 0));
    }
}
