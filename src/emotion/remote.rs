//! LLM-backed emotion classifier.
//!
//! Asks a chat-completions model for a JSON verdict, pulls the first balanced
//! JSON object out of whatever the model wrote, and validates it against the
//! closed label set before anything leaves this module.

use super::label::EmotionLabel;
use super::result::ClassificationResult;
use crate::llm::{CompletionOptions, LlmError, LlmProvider, Message};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const CLASSIFICATION_TEMPERATURE: f32 = 0.1;
const CLASSIFICATION_MAX_TOKENS: u32 = 150;
const CLASSIFICATION_TITLE: &str = "MoodMelody Emotion Detection";

/// Used when the model omits `confidence`.
const DEFAULT_REMOTE_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Error)]
pub enum RemoteClassifierError {
    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error("Remote classifier did not answer within {0:?}")]
    Timeout(Duration),

    #[error("No content in completion response")]
    EmptyContent,

    #[error("No JSON object found in response")]
    NoJsonObject,

    #[error("Malformed classification JSON: {0}")]
    MalformedJson(String),

    #[error("Invalid emotion returned: {0:?}")]
    InvalidEmotion(String),
}

impl RemoteClassifierError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteClassifierError::Provider(LlmError::MissingApiKey) => "missing_credential",
            RemoteClassifierError::Provider(LlmError::Api { .. }) => "bad_status",
            RemoteClassifierError::Provider(LlmError::RateLimited) => "rate_limited",
            RemoteClassifierError::Provider(LlmError::Timeout)
            | RemoteClassifierError::Timeout(_) => "timeout",
            RemoteClassifierError::Provider(LlmError::Connection(_)) => "network",
            RemoteClassifierError::Provider(LlmError::InvalidResponse(_))
            | RemoteClassifierError::EmptyContent => "bad_response",
            RemoteClassifierError::NoJsonObject | RemoteClassifierError::MalformedJson(_) => {
                "unparsable"
            }
            RemoteClassifierError::InvalidEmotion(_) => "invalid_emotion",
        }
    }
}

/// Shape the model is asked to produce. Field types are enforced by serde.
#[derive(Debug, Deserialize)]
struct RemoteVerdict {
    emotion: String,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    reasoning: Option<String>,
}

pub struct RemoteClassifier {
    provider: Arc<dyn LlmProvider>,
    options: CompletionOptions,
    timeout: Duration,
}

impl RemoteClassifier {
    /// `timeout` bounds the whole call, including credential lookup.
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            options: CompletionOptions::titled(
                CLASSIFICATION_TITLE,
                CLASSIFICATION_TEMPERATURE,
                CLASSIFICATION_MAX_TOKENS,
                timeout,
            ),
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Single attempt, no retries.
    pub async fn classify(&self, text: &str) -> Result<ClassificationResult, RemoteClassifierError> {
        let messages = [Message::user(build_prompt(text))];

        let response = tokio::time::timeout(
            self.timeout,
            self.provider.complete(&messages, &self.options),
        )
        .await
        .map_err(|_| RemoteClassifierError::Timeout(self.timeout))??;

        debug!(
            provider = self.provider.name(),
            finish_reason = ?response.finish_reason,
            total_tokens = response.total_tokens,
            "Remote classifier answered"
        );

        let content = response.content.trim();
        if content.is_empty() {
            return Err(RemoteClassifierError::EmptyContent);
        }

        parse_classification(content)
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        r#"Analyze the emotional content of this text and classify it into one of these emotions: joy, sadness, anger, fear, love, surprise.

Text: "{text}"

Respond with ONLY a JSON object in this exact format:
{{
  "emotion": "sadness",
  "confidence": 0.85,
  "reasoning": "The text expresses feeling sad, which clearly indicates sadness emotion"
}}

Valid emotions: joy, sadness, anger, fear, love, surprise
Confidence should be between 0.0 and 1.0"#
    )
}

/// Returns the first balanced `{...}` in `content`, skipping braces inside
/// JSON strings.
fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in content[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&content[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

fn parse_classification(content: &str) -> Result<ClassificationResult, RemoteClassifierError> {
    let json = extract_json_object(content).ok_or(RemoteClassifierError::NoJsonObject)?;

    let verdict: RemoteVerdict = serde_json::from_str(json)
        .map_err(|e| RemoteClassifierError::MalformedJson(e.to_string()))?;

    let emotion: EmotionLabel = verdict
        .emotion
        .parse()
        .map_err(|_| RemoteClassifierError::InvalidEmotion(verdict.emotion.clone()))?;

    Ok(ClassificationResult::remote(
        emotion,
        verdict.confidence.unwrap_or(DEFAULT_REMOTE_CONFIDENCE),
        verdict.reasoning.unwrap_or_default(),
    ))
}
