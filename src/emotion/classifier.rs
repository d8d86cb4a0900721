use super::analysis::MoodAnalyst;
use super::fallback::score_fallback;
use super::remote::RemoteClassifier;
use super::result::ClassificationResult;
use crate::llm::LlmProvider;
use crate::server::metrics::{record_classification, record_remote_failure};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default longest accepted text, in characters.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 5000;
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub max_text_length: usize,
    /// Upper bound for a single remote call.
    pub remote_timeout: Duration,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

/// The only failure callers ever see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Text is required")]
    Empty,

    #[error("Text too long (max {max} characters)")]
    TooLong { max: usize },
}

/// Entry point for journal submission and analytics.
///
/// Stateless between calls; share it behind an `Arc`.
pub struct EmotionClassifier {
    remote: Option<RemoteClassifier>,
    analyst: MoodAnalyst,
    max_text_length: usize,
}

impl EmotionClassifier {
    /// `provider` is `None` when no LLM credential is configured, which skips
    /// the remote stage entirely.
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, settings: &ClassifierSettings) -> Self {
        let remote = provider
            .clone()
            .map(|provider| RemoteClassifier::new(provider, settings.remote_timeout));
        Self {
            remote,
            analyst: MoodAnalyst::new(provider, settings.remote_timeout),
            max_text_length: settings.max_text_length,
        }
    }

    /// Model used by the remote stage, if enabled.
    pub fn remote_model(&self) -> Option<&str> {
        self.remote.as_ref().map(|remote| remote.model())
    }

    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    /// Whitespace-only text counts as empty. Length is counted in characters.
    pub fn validate(&self, text: &str) -> Result<(), InvalidInput> {
        if text.trim().is_empty() {
            return Err(InvalidInput::Empty);
        }
        if text.chars().count() > self.max_text_length {
            return Err(InvalidInput::TooLong {
                max: self.max_text_length,
            });
        }
        Ok(())
    }

    /// Classifies `text`. Apart from input validation this never fails:
    /// remote errors fall through to the keyword scorer, and a text the
    /// scorer cannot place gets the low-confidence default.
    pub async fn classify(&self, text: &str) -> Result<ClassificationResult, InvalidInput> {
        self.validate(text)?;

        let start = Instant::now();
        let result = self.classify_validated(text).await;
        record_classification(result.source().as_str(), start.elapsed());

        info!(
            emotion = %result.emotion(),
            confidence = result.confidence(),
            source = result.source().as_str(),
            "Classified journal text"
        );

        Ok(result)
    }

    async fn classify_validated(&self, text: &str) -> ClassificationResult {
        match &self.remote {
            Some(remote) => match remote.classify(text).await {
                Ok(result) => return result,
                Err(e) => {
                    warn!(kind = e.kind(), "Remote classifier failed, using fallback: {}", e);
                    record_remote_failure(e.kind());
                }
            },
            None => debug!("No remote classifier configured, using fallback"),
        }

        score_fallback(text).into_result()
    }

    /// Free-text analysis path. Same validation as [`Self::classify`].
    pub async fn analyze(&self, prompt: &str) -> Result<String, InvalidInput> {
        self.validate(prompt)?;
        Ok(self.analyst.analyze(prompt).await)
    }
}
