//! Configuration infrastructure
//!
//! Application configuration is layered: built-in defaults, then an optional
//! TOML file, then `IMAGE_RESOLVER__*` environment variables. The merged result
//! is validated before anything is built from it.

use crate::infrastructure::http_client::HttpClientConfig;
use crate::infrastructure::parsing::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Image resolution rule tables
    pub resolver: ResolverConfig,

    /// Page fetcher settings
    pub http: HttpClientConfig,

    /// Batch driver settings
    pub batch: BatchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Batch driver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Delay between consecutive page requests in milliseconds
    pub request_delay_ms: u64,

    /// Numbered gallery fields filled after the main image
    pub gallery_slots: usize,

    /// Drop rows that have no image besides the main one
    pub drop_rows_without_gallery: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: defaults::REQUEST_DELAY_MS,
            gallery_slots: defaults::GALLERY_SLOTS,
            drop_rows_without_gallery: false,
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output (stderr, stdout carries results)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files
    pub log_dir: PathBuf,

    /// Log file name inside `log_dir`
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_dir: PathBuf::from(defaults::LOG_DIR),
            file_name: defaults::LOG_FILE_NAME.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration value for {field}: {message}")]
    Validation { field: String, message: String },
}

impl ConfigError {
    pub fn validation(field: &str, message: impl ToString) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl AppConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolver.validate().map_err(|e| match e {
            crate::infrastructure::parsing::ParsingError::ConfigurationError { field, message } => {
                ConfigError::Validation {
                    field: format!("resolver.{field}"),
                    message,
                }
            }
            other => ConfigError::validation("resolver", other),
        })?;

        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::validation("http.timeout_seconds", "must be greater than 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigError::validation("http.user_agent", "must not be blank"));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::validation("logging.level", "must not be blank"));
        }

        Ok(())
    }
}

/// Loads [`AppConfig`] from file and environment
#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub config_path: PathBuf,
    env_prefix: String,
}

impl ConfigManager {
    /// Manager for an explicit file, or `config/default.toml` when `None`
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path: config_path.unwrap_or_else(|| PathBuf::from(defaults::CONFIG_FILE)),
            env_prefix: defaults::ENV_PREFIX.to_string(),
        }
    }

    /// Override the environment variable prefix
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    /// Load and validate; a missing file falls back to defaults
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(self.config_path.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = settings.try_deserialize()?;
        app_config.validate()?;

        info!("Configuration loaded (file: {})", self.config_path.display());
        Ok(app_config)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Default values
pub mod defaults {
    pub const CONFIG_FILE: &str = "config/default.toml";
    pub const ENV_PREFIX: &str = "IMAGE_RESOLVER";

    pub const REQUEST_DELAY_MS: u64 = 1000;
    pub const GALLERY_SLOTS: usize = crate::domain::constants::limits::DEFAULT_GALLERY_SLOTS;

    pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_DIR: &str = "logs";
    pub const LOG_FILE_NAME: &str = "product-image-resolver.log";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.batch.request_delay_ms, 1000);
        assert_eq!(config.batch.gallery_slots, 5);
        assert_eq!(config.http.timeout_seconds, 10);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::new(Some(dir.path().join("absent.toml")))
            .with_env_prefix("IMAGE_RESOLVER_TEST_ABSENT");
        assert_eq!(manager.load_config().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolver.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[resolver]\nmax_results = 4\n\n[resolver.keywords]\nexcluded = [\"logo\", \"sprite\"]\n\n[batch]\nrequest_delay_ms = 0\ndrop_rows_without_gallery = true"
        )
        .unwrap();

        let config = ConfigManager::new(Some(path))
            .with_env_prefix("IMAGE_RESOLVER_TEST_PARTIAL")
            .load_config()
            .unwrap();
        assert_eq!(config.resolver.max_results, 4);
        assert_eq!(config.resolver.keywords.excluded, vec!["logo", "sprite"]);
        assert_eq!(config.resolver.small_dimension_threshold, 200);
        assert_eq!(config.batch.request_delay_ms, 0);
        assert!(config.batch.drop_rows_without_gallery);
        assert_eq!(config.http, HttpClientConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[resolver]\nmax_results = 0\n").unwrap();

        let result = ConfigManager::new(Some(path))
            .with_env_prefix("IMAGE_RESOLVER_TEST_BAD")
            .load_config();
        assert!(matches!(result, Err(ConfigError::Validation { ref field, .. }) if field == "resolver.max_results"));
    }
}
