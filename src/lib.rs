//! MoodMelody emotion service library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod emotion;
pub mod llm;
pub mod server;

// Re-export commonly used types for convenience
pub use emotion::{ClassificationResult, ClassificationSource, EmotionClassifier, EmotionLabel};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
