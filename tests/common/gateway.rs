//! Fake OpenAI-compatible gateway
//!
//! Serves `POST /chat/completions` on a random port with a fixed reply and
//! records every request it receives, so tests can drive the real
//! `OpenAIProvider` over HTTP.

#![allow(dead_code)]

use super::constants::*;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// What the gateway answers to every completion request.
#[derive(Clone)]
pub enum GatewayReply {
    /// 200 with a single choice whose message content is this text
    Content(String),
    /// Bare status code with a short error body
    Status(u16),
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub referer: Option<String>,
    pub title: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct GatewayState {
    reply: GatewayReply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct FakeGateway {
    /// Base URL to hand to `OpenAIProvider::new`
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl FakeGateway {
    pub async fn spawn(reply: GatewayReply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = GatewayState {
            reply,
            requests: requests.clone(),
        };
        let app = Router::new()
            .route("/chat/completions", post(chat_completions))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind gateway port");
        let port = listener.local_addr().unwrap().port();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Gateway failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Replies with a chat completion carrying `content`
    pub async fn replying(content: &str) -> Self {
        Self::spawn(GatewayReply::Content(content.to_string())).await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeGateway {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn chat_completions(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        authorization: header("authorization"),
        referer: header("http-referer"),
        title: header("x-title"),
        body,
    });

    match state.reply {
        GatewayReply::Content(content) => Json(json!({
            "id": "gen-test",
            "model": TEST_MODEL,
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150 }
        }))
        .into_response(),
        GatewayReply::Status(code) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            "upstream unavailable",
        )
            .into_response(),
    }
}
