//! Emotion classification API routes

use crate::emotion::{ClassificationResult, InvalidInput};

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::state::{GuardedEmotionClassifier, ServerState};

/// Room for the JSON envelope around the text.
const BODY_ENVELOPE_BYTES: usize = 1024;
/// Worst case for one character: a surrogate pair written as two `\uXXXX` escapes.
const MAX_ENCODED_CHAR_BYTES: usize = 12;

/// Largest body that can still carry a text within `max_text_length`.
/// Anything bigger is answered as too long without being buffered.
fn request_body_limit(max_text_length: usize) -> usize {
    max_text_length
        .saturating_mul(MAX_ENCODED_CHAR_BYTES)
        .saturating_add(BODY_ENVELOPE_BYTES)
}

/// Reported next to the default result when the request itself was unusable.
const DEGRADED_ERROR: &str = "All emotion detection methods failed";

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct EmotionBody {
    #[serde(default)]
    pub text: Option<String>,

    /// Routes the text to the free-text analysis path instead.
    #[serde(default)]
    pub is_analysis: Option<bool>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct AnalysisResponse {
    analysis: String,
}

#[derive(Serialize)]
struct DegradedResponse {
    #[serde(flatten)]
    result: ClassificationResult,
    error: &'static str,
}

fn invalid_input(err: InvalidInput) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Classification never answers 5xx; an unreadable request still gets a result.
fn degraded() -> Response {
    Json(DegradedResponse {
        result: ClassificationResult::unknown(),
        error: DEGRADED_ERROR,
    })
    .into_response()
}

async fn post_emotion(
    State(classifier): State<GuardedEmotionClassifier>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return invalid_input(InvalidInput::TooLong {
                max: classifier.max_text_length(),
            });
        }
        Err(rejection) => {
            warn!("Failed to read emotion request body: {}", rejection.body_text());
            return degraded();
        }
    };

    let body: EmotionBody = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(err) => {
            warn!("Unreadable emotion request body: {}", err);
            return degraded();
        }
    };

    let text = body.text.unwrap_or_default();

    if body.is_analysis.unwrap_or(false) {
        return match classifier.analyze(&text).await {
            Ok(analysis) => Json(AnalysisResponse { analysis }).into_response(),
            Err(err) => invalid_input(err),
        };
    }

    match classifier.classify(&text).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => invalid_input(err),
    }
}

pub fn make_emotion_routes(state: ServerState) -> Router {
    let body_limit = request_body_limit(state.classifier.max_text_length());
    Router::new()
        .route("/", post(post_emotion))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
