//! Emotion classification pipeline.
//!
//! Journal text goes through [`EmotionClassifier`], which tries the remote
//! LLM classifier first and degrades to the local weighted-keyword scorer,
//! and finally to a fixed low-confidence default. Every stage produces the
//! same [`ClassificationResult`] shape, tagged with its [`ClassificationSource`].

mod analysis;
mod classifier;
mod fallback;
mod label;
mod lexicon;
mod remote;
mod result;

pub use analysis::MoodAnalyst;
pub use classifier::{
    ClassifierSettings, EmotionClassifier, InvalidInput, DEFAULT_MAX_TEXT_LENGTH,
    DEFAULT_REMOTE_TIMEOUT,
};
pub use fallback::{score_fallback, FallbackScore};
pub use label::{EmotionLabel, ParseEmotionLabelError};
pub use lexicon::{WeightedPhrase, LEXICON};
pub use remote::{RemoteClassifier, RemoteClassifierError};
pub use result::{
    clamp_confidence, ClassificationResult, ClassificationSource, EmotionScores,
    UNKNOWN_CONFIDENCE, UNKNOWN_EMOTION,
};
