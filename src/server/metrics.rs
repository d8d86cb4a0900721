use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all MoodMelody metrics
const PREFIX: &str = "moodmelody";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Classification Metrics
    pub static ref CLASSIFICATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_classifications_total"), "Classifications by producing stage"),
        &["source"]
    ).expect("Failed to create classifications_total metric");

    pub static ref CLASSIFICATION_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_classification_duration_seconds"),
            "Classification duration in seconds, including the remote attempt"
        )
        .buckets(vec![0.0001, 0.001, 0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["source"]
    ).expect("Failed to create classification_duration_seconds metric");

    pub static ref REMOTE_CLASSIFIER_FAILURES_TOTAL: CounterVec = CounterVec::new(
        Opts::new(
            format!("{PREFIX}_remote_classifier_failures_total"),
            "Remote classifier attempts that fell through to the keyword scorer"
        ),
        &["kind"]
    ).expect("Failed to create remote_classifier_failures_total metric");

    // Process Metrics
    pub static ref PROCESS_MEMORY_BYTES: Gauge = Gauge::new(
        format!("{PREFIX}_process_memory_bytes"),
        "Process memory usage in bytes"
    ).expect("Failed to create process_memory_bytes metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(CLASSIFICATIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CLASSIFICATION_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(REMOTE_CLASSIFIER_FAILURES_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(PROCESS_MEMORY_BYTES.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record a finished classification
pub fn record_classification(source: &str, duration: Duration) {
    CLASSIFICATIONS_TOTAL.with_label_values(&[source]).inc();

    CLASSIFICATION_DURATION_SECONDS
        .with_label_values(&[source])
        .observe(duration.as_secs_f64());
}

/// Record a remote classifier failure
pub fn record_remote_failure(kind: &str) {
    REMOTE_CLASSIFIER_FAILURES_TOTAL
        .with_label_values(&[kind])
        .inc();
}

/// Resident set size from `/proc/self/status`, in bytes.
#[cfg(target_os = "linux")]
fn resident_memory_bytes() -> Option<f64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let kb = status
        .lines()
        .find_map(|line| line.strip_prefix("VmRSS:"))?
        .split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()?;
    Some(kb * 1024.0)
}

#[cfg(not(target_os = "linux"))]
fn resident_memory_bytes() -> Option<f64> {
    None
}

pub fn update_memory_usage() {
    if let Some(bytes) = resident_memory_bytes() {
        PROCESS_MEMORY_BYTES.set(bytes);
    }
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> Response {
    update_memory_usage();

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {}", e),
        )
            .into_response();
    }

    (
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}
