//! Test server spawning
//!
//! Runs the real router on a random port. Each test gets its own isolated
//! server with its own classifier.

use super::constants::*;
use moodmelody_emotion::emotion::ClassifierSettings;
use moodmelody_emotion::llm::{ApiKeySource, LlmProvider, OpenAIProvider};
use moodmelody_emotion::{make_app, EmotionClassifier, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Test server instance
///
/// The server is stopped when this is dropped.
pub struct TestServer {
    /// Base URL for HTTP requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Port the server is listening on
    pub port: u16,

    shutdown_tx: Option<oneshot::Sender<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// Spawns a server with no LLM credential: keyword scorer only
    pub async fn spawn() -> Self {
        Self::spawn_with_provider(None).await
    }

    /// Spawns a server whose remote stage talks to `gateway_url`
    pub async fn spawn_with_gateway(gateway_url: &str) -> Self {
        let provider = OpenAIProvider::new(
            gateway_url,
            TEST_MODEL,
            ApiKeySource::Static(TEST_API_KEY.to_string()),
        )
        .with_referer("https://moodmelody.test");
        Self::spawn_with_provider(Some(Arc::new(provider))).await
    }

    pub async fn spawn_with_provider(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        let settings = ClassifierSettings {
            max_text_length: MAX_TEXT_LENGTH,
            remote_timeout: Duration::from_millis(REMOTE_TIMEOUT_MS),
        };
        let classifier = Arc::new(EmotionClassifier::new(provider, &settings));

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port: 0,
            metrics_port: 0,
        };
        let app = make_app(config, classifier);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener.local_addr().unwrap().port();
        let base_url = format!("http://127.0.0.1:{port}");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        wait_for_ready(&base_url).await;

        Self {
            base_url,
            port,
            shutdown_tx: Some(shutdown_tx),
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Polls `GET /` until it answers or the ready timeout elapses
async fn wait_for_ready(base_url: &str) {
    let client = reqwest::Client::new();
    let deadline = tokio::time::Instant::now() + Duration::from_millis(SERVER_READY_TIMEOUT_MS);

    while tokio::time::Instant::now() < deadline {
        if let Ok(response) = client.get(format!("{base_url}/")).send().await {
            if response.status().is_success() {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
    }

    panic!("Server did not become ready within {SERVER_READY_TIMEOUT_MS}ms");
}
