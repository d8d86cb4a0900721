//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per endpoint. When API routes or request
//! formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET / - server stats
    pub async fn stats(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Stats request failed")
    }

    /// POST /v1/emotion - classify a journal entry
    pub async fn classify(&self, text: &str) -> Response {
        self.post_emotion(json!({ "text": text })).await
    }

    /// POST /v1/emotion with `isAnalysis` - free-text analysis
    pub async fn analyze(&self, prompt: &str) -> Response {
        self.post_emotion(json!({ "text": prompt, "isAnalysis": true }))
            .await
    }

    pub async fn post_emotion(&self, body: serde_json::Value) -> Response {
        self.client
            .post(format!("{}/v1/emotion", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("Emotion request failed")
    }

    pub async fn post_emotion_raw(&self, body: &'static str) -> Response {
        self.client
            .post(format!("{}/v1/emotion", self.base_url))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Emotion request failed")
    }
}
