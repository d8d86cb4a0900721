use super::label::EmotionLabel;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Label reported when nothing in the text could be classified.
pub const UNKNOWN_EMOTION: EmotionLabel = EmotionLabel::Joy;

/// Confidence reported alongside [`UNKNOWN_EMOTION`].
pub const UNKNOWN_CONFIDENCE: f64 = 0.1;

/// Which stage of the pipeline produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    Remote,
    Fallback,
    Default,
}

impl ClassificationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationSource::Remote => "remote",
            ClassificationSource::Fallback => "fallback",
            ClassificationSource::Default => "default",
        }
    }
}

/// Clamps a confidence value into `[0.0, 1.0]`. NaN becomes 0.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Weighted keyword totals for every emotion label.
///
/// Always carries all six labels; serializes as a JSON object keyed by label
/// name in [`EmotionLabel::ALL`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmotionScores([u32; 6]);

impl EmotionScores {
    pub fn get(&self, label: EmotionLabel) -> u32 {
        self.0[label.index()]
    }

    pub(crate) fn add(&mut self, label: EmotionLabel, weight: u32) {
        self.0[label.index()] += weight;
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmotionLabel, u32)> + '_ {
        EmotionLabel::ALL
            .into_iter()
            .map(move |label| (label, self.get(label)))
    }
}

impl Serialize for EmotionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(EmotionLabel::ALL.len()))?;
        for (label, score) in self.iter() {
            map.serialize_entry(label.as_str(), &score)?;
        }
        map.end()
    }
}

/// Outcome of a single classification call.
///
/// Constructed only through the per-source constructors, which enforce the
/// confidence range and which optional fields each source may carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    emotion: EmotionLabel,
    confidence: f64,
    source: ClassificationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<EmotionScores>,
}

impl ClassificationResult {
    pub fn remote(emotion: EmotionLabel, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            emotion,
            confidence: clamp_confidence(confidence),
            source: ClassificationSource::Remote,
            reasoning: Some(reasoning.into()),
            matched_keywords: None,
            scores: None,
        }
    }

    pub fn fallback(
        emotion: EmotionLabel,
        confidence: f64,
        matched_keywords: Vec<String>,
        scores: EmotionScores,
    ) -> Self {
        Self {
            emotion,
            confidence: clamp_confidence(confidence),
            source: ClassificationSource::Fallback,
            reasoning: None,
            matched_keywords: Some(matched_keywords),
            scores: Some(scores),
        }
    }

    /// The "unknown" sentinel: lowest confidence, but still a valid label.
    pub fn unknown() -> Self {
        Self {
            emotion: UNKNOWN_EMOTION,
            confidence: UNKNOWN_CONFIDENCE,
            source: ClassificationSource::Default,
            reasoning: None,
            matched_keywords: None,
            scores: None,
        }
    }

    pub fn emotion(&self) -> EmotionLabel {
        self.emotion
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn source(&self) -> ClassificationSource {
        self.source
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref()
    }

    pub fn matched_keywords(&self) -> Option<&[String]> {
        self.matched_keywords.as_deref()
    }

    pub fn scores(&self) -> Option<&EmotionScores> {
        self.scores.as_ref()
    }
}
