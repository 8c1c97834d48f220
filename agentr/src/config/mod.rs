//! Environment configuration for the agent.
//!
//! Read from process environment variables; pair with the `config` crate's
//! `load_and_apply` to layer `.env` and the XDG config file underneath.

use async_openai::config::OpenAIConfig;
use tracing::info;

/// Error for missing required configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(String),
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Environment configuration for AgentR.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// API key for the chat completions endpoint.
    pub api_key: String,
    /// Base URL of the chat completions endpoint.
    pub api_url: String,
    /// Model name used for all completions.
    pub model_name: String,
    /// Tavily API key for web search.
    pub tavily_api_key: String,
    /// Langfuse host; empty when tracing is not configured.
    pub langfuse_base_url: String,
    pub langfuse_public_key: String,
    pub langfuse_secret_key: String,
    /// Log level filter (default "info").
    pub log_level: String,
    /// Deployment environment label (default "development").
    pub environment: String,
}

impl EnvConfig {
    /// Loads configuration from the process environment.
    ///
    /// `API_KEY`, `API_URL`, `MODEL_NAME`, and `TAVILY_API_KEY` are required;
    /// the Langfuse variables default to empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            api_key: required("API_KEY")?,
            api_url: required("API_URL")?,
            model_name: required("MODEL_NAME")?,
            tavily_api_key: required("TAVILY_API_KEY")?,
            langfuse_base_url: optional("LANGFUSE_BASE_URL", ""),
            langfuse_public_key: optional("LANGFUSE_PUBLIC_KEY", ""),
            langfuse_secret_key: optional("LANGFUSE_SECRET_KEY", ""),
            log_level: optional("LOG_LEVEL", "info"),
            environment: optional("ENVIRONMENT", "development"),
        };
        info!(
            model = %config.model_name,
            env = %config.environment,
            "configuration loaded"
        );
        Ok(config)
    }

    /// True when all three Langfuse variables are set.
    pub fn langfuse_configured(&self) -> bool {
        !self.langfuse_base_url.is_empty()
            && !self.langfuse_public_key.is_empty()
            && !self.langfuse_secret_key.is_empty()
    }

    /// OpenAI client config for the configured endpoint.
    pub fn openai_config(&self) -> OpenAIConfig {
        OpenAIConfig::new()
            .with_api_key(self.api_key.clone())
            .with_api_base(self.api_url.clone())
    }
}
