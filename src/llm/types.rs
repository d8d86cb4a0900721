//! Wire-level types shared by every provider.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

/// One chat message. Serializes in the OpenAI chat format as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Why the model stopped writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    /// Cut off by `max_tokens`; a classification verdict may be truncated.
    MaxTokens,
}

impl FinishReason {
    /// Maps the OpenAI `finish_reason` string. Unknown or missing means `Stop`.
    pub fn from_api(reason: Option<&str>) -> Self {
        match reason {
            Some("length") => FinishReason::MaxTokens,
            _ => FinishReason::Stop,
        }
    }
}

/// Assistant text from a completion request.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Empty when the provider sent no content.
    pub content: String,
    pub finish_reason: FinishReason,
    pub total_tokens: Option<u32>,
}

impl CompletionResponse {
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            finish_reason: FinishReason::Stop,
            total_tokens: None,
        }
    }
}
