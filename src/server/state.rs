use axum::extract::FromRef;

use crate::emotion::EmotionClassifier;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedEmotionClassifier = Arc<EmotionClassifier>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub classifier: GuardedEmotionClassifier,
}

impl FromRef<ServerState> for GuardedEmotionClassifier {
    fn from_ref(input: &ServerState) -> Self {
        input.classifier.clone()
    }
}
