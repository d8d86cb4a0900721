use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodmelody_emotion::config::{AppConfig, CliConfig, FileConfig};
use moodmelody_emotion::emotion::{
    EmotionClassifier, DEFAULT_MAX_TEXT_LENGTH, DEFAULT_REMOTE_TIMEOUT,
};
use moodmelody_emotion::server::{metrics, run_server, RequestsLoggingLevel};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Values in it override CLI flags.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3000)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Base URL of the OpenAI-compatible chat completions API.
    #[clap(long)]
    pub llm_base_url: Option<String>,

    /// Model used for remote emotion classification.
    #[clap(long)]
    pub llm_model: Option<String>,

    /// API key for the LLM service. Remote classification is disabled without one.
    #[clap(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,

    /// Shell command that prints the API key, run before each request.
    #[clap(long)]
    pub llm_api_key_command: Option<String>,

    /// Value of the HTTP-Referer header sent to the LLM service.
    #[clap(long)]
    pub llm_referer: Option<String>,

    /// Upper bound in seconds for a single remote classification call.
    #[clap(long, default_value_t = DEFAULT_REMOTE_TIMEOUT.as_secs())]
    pub remote_timeout_sec: u64,

    /// Longest accepted journal text, in characters.
    #[clap(long, default_value_t = DEFAULT_MAX_TEXT_LENGTH)]
    pub max_text_length: usize,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            port: self.port,
            metrics_port: self.metrics_port,
            logging_level: self.logging_level.clone(),
            llm_base_url: self.llm_base_url.clone(),
            llm_model: self.llm_model.clone(),
            llm_api_key: self.llm_api_key.clone(),
            llm_api_key_command: self.llm_api_key_command.clone(),
            llm_referer: self.llm_referer.clone(),
            remote_timeout_sec: self.remote_timeout_sec,
            max_text_length: self.max_text_length,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };

    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Initializing metrics...");
    metrics::init_metrics();

    let provider = match &config.llm {
        Some(llm) => {
            info!(
                "Remote emotion classification enabled: {} at {} (timeout {:?})",
                llm.model, llm.base_url, config.classifier.remote_timeout
            );
            Some(llm.build_provider())
        }
        None => {
            info!("No LLM API key configured, using keyword classification only");
            None
        }
    };

    let classifier = Arc::new(EmotionClassifier::new(provider, &config.classifier));

    run_server(config.server_config(), classifier).await
}
