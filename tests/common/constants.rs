//! Shared constants for end-to-end tests

#![allow(dead_code)]

// ============================================================================
// Journal Entries
// ============================================================================

/// Sadness at the confidence ceiling: "so sad" (4) + "heartbroken" (4) + "sad" (3)
pub const HEARTBROKEN_ENTRY: &str = "I am feeling so sad and heartbroken today";

/// Surprise 5 vs joy 3: "wow" (2) + "surprise" (3) against "amazing" (3)
pub const SURPRISE_ENTRY: &str = "wow that's amazing, what a surprise!";

/// Matches no lexicon phrase at all
pub const NEUTRAL_ENTRY: &str = "the meeting is at noon";

/// Longest accepted entry, in characters
pub const MAX_TEXT_LENGTH: usize = 5000;

// ============================================================================
// Fake LLM Gateway
// ============================================================================

/// API key the fake gateway expects in the Authorization header
pub const TEST_API_KEY: &str = "sk-test-moodmelody";

/// Model name reported by the remote classifier in tests
pub const TEST_MODEL: &str = "test/emotion-model";

// ============================================================================
// Timeouts
// ============================================================================

/// Max time to wait for the server to be ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Request timeout for test HTTP calls
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Interval between readiness checks
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

/// Remote classifier bound used by test servers
pub const REMOTE_TIMEOUT_MS: u64 = 500;
