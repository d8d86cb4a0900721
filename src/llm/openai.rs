//! OpenAI-compatible chat completions client.
//!
//! The default endpoint is OpenRouter, but anything speaking the OpenAI chat
//! completions API works (OpenAI itself, vLLM, Together AI).

use super::provider::{CompletionOptions, LlmError, LlmProvider};
use super::types::{CompletionResponse, FinishReason, Message};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

const API_KEY_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the bearer token comes from.
#[derive(Debug, Clone)]
pub enum ApiKeySource {
    Static(String),
    /// Shell command printing the key, run before every request so rotated
    /// tokens are picked up.
    Command(String),
}

impl ApiKeySource {
    async fn resolve(&self) -> Result<String, LlmError> {
        let key = match self {
            ApiKeySource::Static(key) => key.trim().to_string(),
            ApiKeySource::Command(cmd) => run_key_command(cmd).await?,
        };
        if key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }
        Ok(key)
    }
}

async fn run_key_command(cmd: &str) -> Result<String, LlmError> {
    debug!(command = %cmd, "Fetching API key via command");

    let output = tokio::time::timeout(
        API_KEY_COMMAND_TIMEOUT,
        Command::new("sh").arg("-c").arg(cmd).output(),
    )
    .await
    .map_err(|_| {
        warn!(command = %cmd, "api_key_command timed out");
        LlmError::Timeout
    })?
    .map_err(|e| {
        warn!(command = %cmd, error = %e, "api_key_command failed to execute");
        LlmError::Connection(format!("Failed to execute api_key_command: {}", e))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(command = %cmd, stderr = %stderr, "api_key_command failed");
        return Err(LlmError::Connection(format!(
            "api_key_command exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

pub struct OpenAIProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key_source: ApiKeySource,
    referer: Option<String>,
}

impl OpenAIProvider {
    /// `base_url` is the API root, e.g. `https://openrouter.ai/api/v1`.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key_source: ApiKeySource,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key_source,
            referer: None,
        }
    }

    /// Sets the `HTTP-Referer` header OpenRouter uses for attribution.
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        let api_key = self.api_key_source.resolve().await?;

        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let mut request = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .timeout(options.timeout)
            .json(&body);
        if let Some(referer) = &self.referer {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(title) = &options.app_title {
            request = request.header("X-Title", title);
        }

        debug!(model = %self.model, messages = messages.len(), "Sending chat completion request");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::Connection(e.to_string())
            }
        })?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(LlmError::RateLimited),
            status if !status.is_success() => {
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                })
            }
            _ => {}
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Unreadable completion body: {}", e)))?;

        chat.into_completion()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

impl ChatResponse {
    /// Keeps only the first choice.
    fn into_completion(self) -> Result<CompletionResponse, LlmError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in completion".to_string()))?;

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            finish_reason: FinishReason::from_api(choice.finish_reason.as_deref()),
            total_tokens: self.usage.map(|u| u.total_tokens),
        })
    }
}
