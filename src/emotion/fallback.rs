//! Offline weighted-keyword emotion scorer.
//!
//! Pure and deterministic: lower-cases the text, adds up the weight of every
//! lexicon phrase found as a substring, and picks the emotion with the highest
//! total. Overlapping phrases ("so sad" and "sad") both count.

use super::label::EmotionLabel;
use super::lexicon::LEXICON;
use super::result::{ClassificationResult, EmotionScores, UNKNOWN_CONFIDENCE, UNKNOWN_EMOTION};

/// Confidence of any text with at least one match, before adding per-point weight.
const CONFIDENCE_FLOOR: f64 = 0.3;
const CONFIDENCE_PER_POINT: f64 = 0.1;
/// Keyword matching never claims more than this.
const CONFIDENCE_CEILING: f64 = 0.85;

/// Output of [`score_fallback`].
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackScore {
    pub emotion: EmotionLabel,
    pub confidence: f64,
    /// Matched phrases, first-match order, without duplicates.
    pub matched_keywords: Vec<String>,
    pub scores: EmotionScores,
    /// Total of the winning emotion; 0 means nothing matched.
    pub top_score: u32,
}

impl FallbackScore {
    pub fn is_match(&self) -> bool {
        self.top_score > 0
    }

    /// Converts into a pipeline result; a zero-score text becomes the unknown default.
    pub fn into_result(self) -> ClassificationResult {
        if !self.is_match() {
            return ClassificationResult::unknown();
        }
        ClassificationResult::fallback(
            self.emotion,
            self.confidence,
            self.matched_keywords,
            self.scores,
        )
    }
}

fn confidence_for(top_score: u32) -> f64 {
    if top_score == 0 {
        return UNKNOWN_CONFIDENCE;
    }
    (CONFIDENCE_FLOOR + top_score as f64 * CONFIDENCE_PER_POINT).min(CONFIDENCE_CEILING)
}

/// Scores `text` against the lexicon.
pub fn score_fallback(text: &str) -> FallbackScore {
    let normalized = text.trim().to_lowercase();

    let mut scores = EmotionScores::default();
    let mut matched_keywords: Vec<String> = Vec::new();
    let mut best: Option<(EmotionLabel, u32)> = None;

    for &(emotion, phrases) in LEXICON {
        for entry in phrases.iter().filter(|entry| normalized.contains(entry.phrase)) {
            scores.add(emotion, entry.weight);
            if !matched_keywords.iter().any(|kw| kw == entry.phrase) {
                matched_keywords.push(entry.phrase.to_string());
            }
        }

        // Strictly greater: on ties the emotion declared first keeps the lead.
        let total = scores.get(emotion);
        if best.map_or(true, |(_, best_total)| total > best_total) {
            best = Some((emotion, total));
        }
    }

    let (emotion, top_score) = match best {
        Some((emotion, total)) if total > 0 => (emotion, total),
        _ => (UNKNOWN_EMOTION, 0),
    };

    FallbackScore {
        emotion,
        confidence: confidence_for(top_score),
        matched_keywords,
        scores,
        top_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn heartbroken_entry_is_sadness_at_ceiling() {
        let score = score_fallback("I am feeling so sad and heartbroken today");

        assert_eq!(score.emotion, EmotionLabel::Sadness);
        assert_eq!(score.scores.get(EmotionLabel::Sadness), 11);
        assert_eq!(score.top_score, 11);
        assert_eq!(score.confidence, 0.85);
        // "heart" is nested in "heartbroken" and counts for love as well.
        assert_eq!(score.scores.get(EmotionLabel::Love), 2);
        assert_eq!(
            score.matched_keywords,
            vec!["so sad", "heartbroken", "sad", "heart"]
        );
    }

    #[test]
    fn surprise_outscores_single_joy_word() {
        let score = score_fallback("wow that's amazing, what a surprise!");

        assert_eq!(score.emotion, EmotionLabel::Surprise);
        assert_eq!(score.scores.get(EmotionLabel::Surprise), 5);
        assert_eq!(score.scores.get(EmotionLabel::Joy), 3);
        assert_close(score.confidence, 0.8);
        assert_eq!(score.matched_keywords, vec!["amazing", "wow", "surprise"]);
    }

    #[test]
    fn nested_phrases_add_up() {
        let score = score_fallback("so sad");
        // "so sad" (4) + "sad" (3)
        assert_eq!(score.scores.get(EmotionLabel::Sadness), 7);
        assert_eq!(score.matched_keywords, vec!["so sad", "sad"]);
    }

    #[test]
    fn tie_resolves_to_first_declared_emotion() {
        // "sad" (3) vs "happy" (3): sadness is declared before joy.
        let score = score_fallback("sad but happy");
        assert_eq!(score.scores.get(EmotionLabel::Sadness), 3);
        assert_eq!(score.scores.get(EmotionLabel::Joy), 3);
        assert_eq!(score.emotion, EmotionLabel::Sadness);

        let reversed = score_fallback("happy but sad");
        assert_eq!(reversed.emotion, EmotionLabel::Sadness);
    }

    #[test]
    fn tie_between_later_emotions_follows_declaration_order() {
        // "angry" (3) vs "scared" (3): anger is declared before fear.
        let score = score_fallback("angry and scared");
        assert_eq!(score.scores.get(EmotionLabel::Anger), 3);
        assert_eq!(score.scores.get(EmotionLabel::Fear), 3);
        assert_eq!(score.emotion, EmotionLabel::Anger);
    }

    #[test]
    fn no_match_is_low_confidence_joy() {
        let score = score_fallback("the quick brown fox");
        assert!(!score.is_match());
        assert_eq!(score.emotion, EmotionLabel::Joy);
        assert_eq!(score.confidence, 0.1);
        assert!(score.matched_keywords.is_empty());
        assert!(score.scores.iter().all(|(_, total)| total == 0));
        assert_eq!(score.scores.iter().count(), 6);
    }

    #[test]
    fn empty_text_is_degenerate() {
        let score = score_fallback("");
        assert!(!score.is_match());
        assert_eq!(score.into_result(), ClassificationResult::unknown());
    }

    #[test]
    fn single_weak_word_stays_low() {
        let score = score_fallback("good");
        assert_eq!(score.emotion, EmotionLabel::Joy);
        assert_close(score.confidence, 0.4);
    }

    #[test]
    fn saturates_at_ceiling() {
        // "furious" (4) + "rage" (4)
        let score = score_fallback("furious, pure rage");
        assert_eq!(score.top_score, 8);
        assert_eq!(score.confidence, 0.85);

        // a single weight-5 declaration + weight-3 word crosses 5.5 as well
        let score = score_fallback("I'm in love");
        assert_eq!(score.emotion, EmotionLabel::Love);
        assert_eq!(score.top_score, 8);
        assert_eq!(score.confidence, 0.85);
    }

    #[test]
    fn normalizes_case_and_surrounding_whitespace() {
        let score = score_fallback("   TERRIFIED   ");
        assert_eq!(score.emotion, EmotionLabel::Fear);
        assert_eq!(score.matched_keywords, vec!["terrified"]);
    }

    #[test]
    fn scoring_is_deterministic() {
        let text = "Frustrated and annoyed, but I love my caring friends";
        let first = score_fallback(text);
        let second = score_fallback(text);
        assert_eq!(first, second);
        assert_eq!(first.confidence.to_bits(), second.confidence.to_bits());
    }

    #[test]
    fn into_result_carries_fallback_details() {
        let result = score_fallback("so angry").into_result();
        assert_eq!(result.emotion(), EmotionLabel::Anger);
        assert_eq!(
            result.source(),
            crate::emotion::ClassificationSource::Fallback
        );
        assert_eq!(
            result.matched_keywords(),
            Some(&["so angry".to_string(), "angry".to_string()][..])
        );
        assert_eq!(result.scores().map(|s| s.get(EmotionLabel::Anger)), Some(8));
    }
}
