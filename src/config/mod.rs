//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MOTIONFLOW` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use motionflow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Drafts stored in {}", config.storage.data_dir.display());
//! ```

mod ai;
mod error;
mod export;
mod storage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Text refinement provider (OpenAI-compatible endpoint)
    #[serde(default)]
    pub ai: AiConfig,

    /// Draft and theme persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// PDF export engine
    #[serde(default)]
    pub export: ExportConfig,

    /// Default tracing filter, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            storage: StorageConfig::default(),
            export: ExportConfig::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "motionflow=info".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MOTIONFLOW` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MOTIONFLOW__AI__API_KEY=...` -> `ai.api_key = ...`
    /// - `MOTIONFLOW__STORAGE__DATA_DIR=/tmp/mf` -> `storage.data_dir = /tmp/mf`
    /// - `MOTIONFLOW__LOG_LEVEL=debug` -> `log_level = debug`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MOTIONFLOW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - URL format of the AI endpoint
    /// - Non-zero timeouts (an unset AI timeout means none)
    /// - A parseable log filter
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.storage.validate()?;
        self.export.validate()?;

        tracing_subscriber::EnvFilter::try_new(&self.log_level)
            .map_err(|e| ValidationError::InvalidLogLevel(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "MOTIONFLOW__AI__API_KEY",
        "MOTIONFLOW__AI__MODEL",
        "MOTIONFLOW__AI__TIMEOUT_SECS",
        "MOTIONFLOW__STORAGE__DATA_DIR",
        "MOTIONFLOW__EXPORT__PDF_TIMEOUT_SECS",
        "MOTIONFLOW__LOG_LEVEL",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(!config.ai.has_api_key());
        assert_eq!(config.log_level, "motionflow=info");
        assert!(config.ai.timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MOTIONFLOW__AI__API_KEY", "test-key");
        env::set_var("MOTIONFLOW__AI__MODEL", "gemini-2.5-flash");
        env::set_var("MOTIONFLOW__AI__TIMEOUT_SECS", "45");
        env::set_var("MOTIONFLOW__STORAGE__DATA_DIR", "/tmp/motionflow-test");
        env::set_var("MOTIONFLOW__EXPORT__PDF_TIMEOUT_SECS", "90");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.has_api_key());
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert_eq!(config.ai.timeout_secs, Some(45));
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/motionflow-test"));
        assert_eq!(config.export.pdf_timeout_secs, 90);
    }

    #[test]
    fn test_custom_log_level() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MOTIONFLOW__LOG_LEVEL", "motionflow=debug");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().log_level, "motionflow=debug");
    }

    #[test]
    fn test_validate_rejects_bad_log_filter() {
        let config = AppConfig {
            log_level: "motionflow=[".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogLevel(_))
        ));
    }
}
