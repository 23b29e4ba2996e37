//! Configuration management for Literatus services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Assistant (AI provider) configuration
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Library configuration
    #[serde(default)]
    pub library: LibraryConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    /// Assistant provider: anthropic, openai-compat, mock
    #[serde(default = "default_assistant_provider")]
    pub provider: String,

    /// API key for the provider
    pub api_key: Option<String>,

    /// API base URL (for OpenAI-compatible endpoints, e.g. Perplexity)
    pub api_base: Option<String>,

    /// Model used for metadata extraction (fast); provider default if unset
    pub extract_model: Option<String>,

    /// Model used for paper analysis (deep); provider default if unset
    pub analyze_model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_assistant_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries
    #[serde(default = "default_assistant_retries")]
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Seed the library with the sample papers on startup
    #[serde(default = "default_seed_samples")]
    pub seed_samples: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3001 }
fn default_request_timeout() -> u64 { 30 }
fn default_max_upload() -> usize { 25 * 1024 * 1024 }
fn default_assistant_provider() -> String { "anthropic".to_string() }
fn default_assistant_timeout() -> u64 { 30 }
fn default_assistant_retries() -> u32 { 3 }
fn default_seed_samples() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "literatus".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with APP__ prefix
            // e.g., APP__SERVER__PORT=8081
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// Get assistant timeout as Duration
    pub fn assistant_timeout(&self) -> Duration {
        Duration::from_secs(self.assistant.timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            assistant: AssistantConfig::default(),
            library: LibraryConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: default_assistant_provider(),
            api_key: None,
            api_base: None,
            extract_model: None,
            analyze_model: None,
            timeout_secs: default_assistant_timeout(),
            max_retries: default_assistant_retries(),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            seed_samples: default_seed_samples(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: default_metrics_port(),
            service_name: default_service_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.assistant.provider, "anthropic");
        assert_eq!(config.assistant.max_retries, 3);
        assert!(config.assistant.extract_model.is_none());
        assert!(config.library.seed_samples);
    }

    #[test]
    fn test_timeouts_as_durations() {
        let config = AppConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.assistant_timeout(), Duration::from_secs(30));
    }
}
