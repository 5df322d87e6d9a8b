//! Configuration management for docreply.
//!
//! Configuration is an explicit object handed to the pipeline; nothing
//! mutates process-wide state. Sources are merged in order:
//! - defaults
//! - YAML config file (`docreply.yaml` next to the documents folder, or
//!   an explicit `--config` path)
//! - environment variables (`DOCREPLY_*`)
//! - command-line flags
//!
//! API keys are never stored in the file; the file names the environment
//! variable holding the key and [`AppConfig::resolve_api_key`] reads it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default number of passages retrieved per question.
pub const DEFAULT_TOP_K: usize = 5;

/// Default relevance threshold for keeping a retrieved passage.
///
/// A fixed tunable, not derived from data. Passages must score strictly
/// above this value to be used as grounding evidence.
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.6;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider (e.g., "openai", "ollama")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// API key for the LLM provider (resolved, not a reference)
    pub api_key: Option<String>,

    /// Passages retrieved per question
    pub top_k: usize,

    /// Minimum score (exclusive) for evidence to be kept
    pub relevance_threshold: f32,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Per-provider LLM configurations
    pub llm: Option<LlmConfig>,
}

/// LLM configuration from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,

    pub providers: HashMap<String, ProviderConfig>,
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderConfig {
    OpenAi {
        #[serde(rename = "apiKeyEnv")]
        api_key_env: String,
        model: String,
        endpoint: Option<String>,
    },
    Ollama {
        endpoint: String,
        model: String,
        timeout: Option<u64>,
    },
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmConfig>,
    pipeline: Option<PipelineConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PipelineConfig {
    #[serde(rename = "topK")]
    top_k: Option<usize>,
    #[serde(rename = "relevanceThreshold")]
    relevance_threshold: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            provider: "openai".to_string(),
            model: "gpt-4".to_string(),
            api_key: None,
            top_k: DEFAULT_TOP_K,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            log_level: None,
            verbose: false,
            no_color: false,
            llm: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `DOCREPLY_CONFIG`: path to a YAML config file
    /// - `DOCREPLY_PROVIDER`: LLM provider
    /// - `DOCREPLY_MODEL`: model identifier
    /// - `DOCREPLY_API_KEY`: API key (overrides provider `apiKeyEnv`)
    /// - `RUST_LOG`: log level
    /// - `NO_COLOR`: disable colored output
    pub fn load() -> AppResult<Self> {
        Self::load_with_file(None)
    }

    /// Load configuration with an explicit config file path.
    ///
    /// The explicit path takes precedence over `DOCREPLY_CONFIG`.
    pub fn load_with_file(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        config.config_file = config_file;
        if config.config_file.is_none() {
            if let Ok(path) = std::env::var("DOCREPLY_CONFIG") {
                config.config_file = Some(PathBuf::from(path));
            }
        }

        if let Some(path) = config.config_file.clone() {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Config file does not exist: {:?}",
                    path
                )));
            }
            config = config.merge_yaml(&path)?;
        }

        // Environment variables override file settings
        if let Ok(provider) = std::env::var("DOCREPLY_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("DOCREPLY_MODEL") {
            config.model = model;
        }

        if let Ok(key) = std::env::var("DOCREPLY_API_KEY") {
            config.api_key = Some(key);
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(pipeline) = config_file.pipeline {
            if let Some(top_k) = pipeline.top_k {
                result.top_k = top_k;
            }
            if let Some(threshold) = pipeline.relevance_threshold {
                result.relevance_threshold = threshold;
            }
        }

        if let Some(llm) = config_file.llm {
            result.provider = llm.active_provider.clone();

            if let Some(provider_config) = llm.providers.get(&llm.active_provider) {
                result.model = match provider_config {
                    ProviderConfig::OpenAi { model, .. } => model.clone(),
                    ProviderConfig::Ollama { model, .. } => model.clone(),
                };
            }

            result.llm = Some(llm);
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and file values.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        top_k: Option<usize>,
        relevance_threshold: Option<f32>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(top_k) = top_k {
            self.top_k = top_k;
        }

        if let Some(threshold) = relevance_threshold {
            self.relevance_threshold = threshold;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the configuration for a named provider, if any.
    pub fn get_provider_config(&self, provider: &str) -> Option<ProviderConfig> {
        self.llm
            .as_ref()
            .and_then(|llm| llm.providers.get(provider).cloned())
    }

    /// Resolve the API key for a provider.
    ///
    /// This is the seam to the secret/credential collaborator: an explicit
    /// `DOCREPLY_API_KEY` wins, otherwise the provider config names the
    /// environment variable holding the key.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        if let Some(ProviderConfig::OpenAi { api_key_env, .. }) =
            self.get_provider_config(provider)
        {
            if let Ok(key) = std::env::var(&api_key_env) {
                return Some(key);
            }
        }

        None
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["openai", "ollama"];

        if !known_providers.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                known_providers.join(", ")
            )));
        }

        if self.provider == "openai" && self.resolve_api_key("openai").is_none() {
            return Err(AppError::Config(
                "OpenAI provider requires an API key (DOCREPLY_API_KEY or apiKeyEnv)".to_string(),
            ));
        }

        if self.top_k == 0 {
            return Err(AppError::Config("top_k must be at least 1".to_string()));
        }

        Ok(())
    }
}
