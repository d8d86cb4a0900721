mod file_config;

pub use file_config::{ClassifierConfig, FileConfig, LlmConfig};

use crate::emotion::{ClassifierSettings, DEFAULT_MAX_TEXT_LENGTH, DEFAULT_REMOTE_TIMEOUT};
use crate::llm::{ApiKeySource, LlmProvider, OpenAIProvider};
use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_LLM_MODEL: &str = "mistralai/mistral-small-3.2-24b-instruct:free";
pub const DEFAULT_LLM_REFERER: &str = "http://localhost:3000";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub llm_base_url: Option<String>,
    pub llm_model: Option<String>,
    pub llm_api_key: Option<String>,
    pub llm_api_key_command: Option<String>,
    pub llm_referer: Option<String>,
    pub remote_timeout_sec: u64,
    pub max_text_length: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            metrics_port: 9091,
            logging_level: RequestsLoggingLevel::Path,
            llm_base_url: None,
            llm_model: None,
            llm_api_key: None,
            llm_api_key_command: None,
            llm_referer: None,
            remote_timeout_sec: DEFAULT_REMOTE_TIMEOUT.as_secs(),
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Core settings
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,

    /// `None` when no credential is configured; remote classification is skipped.
    pub llm: Option<LlmSettings>,
    pub classifier: ClassifierSettings,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub api_key_source: ApiKeySource,
    pub referer: String,
}

impl LlmSettings {
    pub fn build_provider(&self) -> Arc<dyn LlmProvider> {
        Arc::new(
            OpenAIProvider::new(&self.base_url, &self.model, self.api_key_source.clone())
                .with_referer(&self.referer),
        )
    }
}

/// Treats blank strings as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let llm_file = file.llm.unwrap_or_default();

        // The credential is resolved per layer: any TOML credential replaces
        // the CLI/env one wholesale.
        let api_key_source = match credential_layer(llm_file.api_key, llm_file.api_key_command)? {
            Some(source) => Some(source),
            None => credential_layer(cli.llm_api_key.clone(), cli.llm_api_key_command.clone())?,
        };

        let remote_timeout_sec = llm_file
            .remote_timeout_sec
            .unwrap_or(cli.remote_timeout_sec);
        if remote_timeout_sec == 0 {
            bail!("remote_timeout_sec must be greater than zero");
        }

        let llm = api_key_source.map(|api_key_source| LlmSettings {
            base_url: llm_file
                .base_url
                .or_else(|| cli.llm_base_url.clone())
                .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            model: llm_file
                .model
                .or_else(|| cli.llm_model.clone())
                .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            api_key_source,
            referer: llm_file
                .referer
                .or_else(|| cli.llm_referer.clone())
                .unwrap_or_else(|| DEFAULT_LLM_REFERER.to_string()),
        });

        let max_text_length = file
            .classifier
            .unwrap_or_default()
            .max_text_length
            .unwrap_or(cli.max_text_length);
        if max_text_length == 0 {
            bail!("max_text_length must be greater than zero");
        }

        let classifier = ClassifierSettings {
            max_text_length,
            remote_timeout: Duration::from_secs(remote_timeout_sec),
        };

        Ok(Self {
            port,
            metrics_port,
            logging_level,
            llm,
            classifier,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
        }
    }
}

/// Credential set by a single config layer; both set in the same layer is an error.
fn credential_layer(
    api_key: Option<String>,
    api_key_command: Option<String>,
) -> Result<Option<ApiKeySource>> {
    match (non_blank(api_key), non_blank(api_key_command)) {
        (Some(_), Some(_)) => {
            bail!("api_key and api_key_command are mutually exclusive, set only one")
        }
        (Some(key), None) => Ok(Some(ApiKeySource::Static(key))),
        (None, Some(cmd)) => Ok(Some(ApiKeySource::Command(cmd))),
        (None, None) => Ok(None),
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
