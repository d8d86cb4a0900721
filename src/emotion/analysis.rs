//! Free-text mood analysis for the dashboard insights panel.
//!
//! Unlike classification there is no structure to validate: the model's prose
//! is passed through, and every failure turns into a canned encouragement.

use crate::llm::{CompletionOptions, LlmProvider, Message};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const ANALYSIS_TEMPERATURE: f32 = 0.7;
const ANALYSIS_MAX_TOKENS: u32 = 800;
const ANALYSIS_TITLE: &str = "MoodMelody AI Analysis";

pub(crate) const UNAVAILABLE_ANALYSIS: &str = "AI analysis is currently unavailable. However, your consistent mood tracking shows great self-awareness and commitment to emotional well-being.";
pub(crate) const FAILED_ANALYSIS: &str = "Your mood tracking shows dedication to emotional growth. Keep journaling to discover patterns and insights about your emotional well-being.";
pub(crate) const EMPTY_ANALYSIS: &str = "Analysis completed. Your mood tracking journey shows positive engagement with emotional self-awareness.";

pub struct MoodAnalyst {
    provider: Option<Arc<dyn LlmProvider>>,
    options: CompletionOptions,
    timeout: Duration,
}

impl MoodAnalyst {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, timeout: Duration) -> Self {
        Self {
            provider,
            options: CompletionOptions::titled(
                ANALYSIS_TITLE,
                ANALYSIS_TEMPERATURE,
                ANALYSIS_MAX_TOKENS,
                timeout,
            ),
            timeout,
        }
    }

    /// Runs `prompt` as-is and returns the model's prose, or a canned text.
    pub async fn analyze(&self, prompt: &str) -> String {
        let Some(provider) = &self.provider else {
            debug!("No LLM provider configured, returning canned analysis");
            return UNAVAILABLE_ANALYSIS.to_string();
        };

        let messages = [Message::user(prompt)];
        let result =
            tokio::time::timeout(self.timeout, provider.complete(&messages, &self.options)).await;

        match result {
            Ok(Ok(response)) => {
                let analysis = response.content.trim();
                if analysis.is_empty() {
                    EMPTY_ANALYSIS.to_string()
                } else {
                    analysis.to_string()
                }
            }
            Ok(Err(e)) => {
                warn!("Mood analysis failed: {}", e);
                FAILED_ANALYSIS.to_string()
            }
            Err(_) => {
                warn!("Mood analysis timed out after {:?}", self.timeout);
                FAILED_ANALYSIS.to_string()
            }
        }
    }
}
