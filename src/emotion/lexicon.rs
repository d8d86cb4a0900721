//! Weighted phrase table for the offline scorer.
//!
//! Weights run from 1 (weak or ambiguous word) to 5 (explicit first-person
//! declaration). The emotion order here is the tie-break order.

use super::label::EmotionLabel;

/// A literal substring and how much it counts towards its emotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedPhrase {
    pub phrase: &'static str,
    pub weight: u32,
}

const fn wp(phrase: &'static str, weight: u32) -> WeightedPhrase {
    WeightedPhrase { phrase, weight }
}

// ── Phrase tables ───────────────────────────────────────────────────────

const SADNESS: &[WeightedPhrase] = &[
    wp("feeling sad", 5),
    wp("i am sad", 5),
    wp("feel sad", 4),
    wp("so sad", 4),
    wp("depressed", 4),
    wp("heartbroken", 4),
    wp("devastated", 4),
    wp("crying", 3),
    wp("tears", 3),
    wp("sad", 3),
    wp("down", 2),
    wp("upset", 2),
    wp("hurt", 2),
    wp("pain", 2),
    wp("lost", 2),
    wp("lonely", 2),
    wp("empty", 2),
    wp("blue", 1),
    wp("low", 1),
];

const JOY: &[WeightedPhrase] = &[
    wp("feeling happy", 5),
    wp("so happy", 4),
    wp("excited", 3),
    wp("amazing", 3),
    wp("wonderful", 3),
    wp("fantastic", 3),
    wp("great", 2),
    wp("happy", 3),
    wp("joy", 3),
    wp("awesome", 2),
    wp("brilliant", 2),
    wp("good", 1),
];

const ANGER: &[WeightedPhrase] = &[
    wp("so angry", 5),
    wp("feeling angry", 5),
    wp("pissed off", 4),
    wp("furious", 4),
    wp("rage", 4),
    wp("angry", 3),
    wp("mad", 3),
    wp("frustrated", 2),
    wp("annoyed", 2),
    wp("hate", 2),
];

const FEAR: &[WeightedPhrase] = &[
    wp("feeling scared", 5),
    wp("so scared", 4),
    wp("terrified", 4),
    wp("anxious", 3),
    wp("worried", 3),
    wp("afraid", 3),
    wp("scared", 3),
    wp("nervous", 2),
    wp("panic", 2),
];

const LOVE: &[WeightedPhrase] = &[
    wp("in love", 5),
    wp("feeling loved", 4),
    wp("romantic", 3),
    wp("love", 3),
    wp("adore", 3),
    wp("heart", 2),
    wp("caring", 2),
];

const SURPRISE: &[WeightedPhrase] = &[
    wp("so surprised", 4),
    wp("unexpected", 3),
    wp("shocked", 3),
    wp("amazed", 3),
    wp("wow", 2),
    wp("surprised", 3),
    wp("surprise", 3),
];

/// Every emotion with its phrases, in tie-break order.
pub static LEXICON: &[(EmotionLabel, &[WeightedPhrase])] = &[
    (EmotionLabel::Sadness, SADNESS),
    (EmotionLabel::Joy, JOY),
    (EmotionLabel::Anger, ANGER),
    (EmotionLabel::Fear, FEAR),
    (EmotionLabel::Love, LOVE),
    (EmotionLabel::Surprise, SURPRISE),
];
