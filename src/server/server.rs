use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use axum::{
    extract::State, middleware, response::IntoResponse, routing::get, Json, Router,
};
use serde::Serialize;
use tracing::{error, info};

use super::{
    log_requests, make_emotion_routes, metrics::metrics_handler, state::*, ServerConfig,
};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub remote_classifier: bool,
    pub model: Option<String>,
    pub max_text_length: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let model = state.classifier.remote_model().map(|m| m.to_string());
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        remote_classifier: model.is_some(),
        model,
        max_text_length: state.classifier.max_text_length(),
    };
    Json(stats)
}

pub fn make_app(config: ServerConfig, classifier: GuardedEmotionClassifier) -> Router {
    let state = ServerState {
        config,
        start_time: Instant::now(),
        classifier,
    };

    let emotion_routes = make_emotion_routes(state.clone());

    let home_router: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone());

    home_router
        .nest("/v1/emotion", emotion_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(config: ServerConfig, classifier: GuardedEmotionClassifier) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, classifier);

    let metrics_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(metrics_listener, make_metrics_app()).await {
            error!("Metrics server stopped: {}", e);
        }
    });
    info!("Metrics available at port {}!", metrics_port);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Ready to serve at port {}!", port);

    Ok(axum::serve(listener, app).await?)
}
