//! LLM provider trait definition.

use super::types::{CompletionResponse, Message};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Per-request sampling and transport settings.
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// HTTP client timeout for this request.
    pub timeout: Duration,
    /// Sent as OpenRouter's `X-Title` attribution header.
    pub app_title: Option<String>,
}

impl CompletionOptions {
    pub fn titled(title: &str, temperature: f32, max_tokens: u32, timeout: Duration) -> Self {
        Self {
            temperature,
            max_tokens: Some(max_tokens),
            timeout,
            app_title: Some(title.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Request timeout")]
    Timeout,

    #[error("API key not configured")]
    MissingApiKey,
}

/// A chat-completions backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    /// Single completion request. Implementations must not retry.
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError>;
}
