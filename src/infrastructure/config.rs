//! Application configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `yikes.toml` in the working directory, then environment variables
//! (`OLLAMA_BASE_URL`, `OLLAMA_MODEL`, `REQUEST_TIMEOUT_SECS`,
//! `MIN_CALL_INTERVAL_MS`, `CONTEXT_WINDOW`).

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "dolphin3:8b";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ollama server base URL
    pub ollama_base_url: String,
    /// Model requested on every chat call
    pub ollama_model: String,
    /// HTTP timeout for one backend call
    pub request_timeout_secs: u64,
    /// Minimum spacing between backend calls
    pub min_call_interval_ms: u64,
    /// Maximum transcript length in characters
    pub context_window: usize,
}

impl AppConfig {
    /// Load configuration from defaults, `yikes.toml` and the process environment
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::default().try_parsing(true))
    }

    /// Load configuration from defaults, `yikes.toml` and the given variables
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::load(Environment::default().try_parsing(true).source(Some(vars)))
    }

    fn load(environment: Environment) -> Result<Self> {
        let config = Config::builder()
            .set_default("ollama_base_url", DEFAULT_OLLAMA_BASE_URL)?
            .set_default("ollama_model", DEFAULT_OLLAMA_MODEL)?
            .set_default("request_timeout_secs", 120_i64)?
            .set_default("min_call_interval_ms", 100_i64)?
            .set_default("context_window", 16384_i64)?
            .add_source(File::with_name("yikes").required(false))
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Invalid configuration value")?;

        if app_config.context_window == 0 {
            anyhow::bail!("CONTEXT_WINDOW must be greater than 0");
        }
        Ok(app_config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn min_call_interval(&self) -> Duration {
        Duration::from_millis(self.min_call_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(config.ollama_base_url, DEFAULT_OLLAMA_BASE_URL);
        assert_eq!(config.ollama_model, DEFAULT_OLLAMA_MODEL);
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
        assert_eq!(config.min_call_interval(), Duration::from_millis(100));
        assert_eq!(config.context_window, 16384);
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::from_vars(vars(&[
            ("OLLAMA_MODEL", "llama3.2"),
            ("MIN_CALL_INTERVAL_MS", "250"),
            ("CONTEXT_WINDOW", "4096"),
        ]))
        .unwrap();
        assert_eq!(config.ollama_model, "llama3.2");
        assert_eq!(config.min_call_interval(), Duration::from_millis(250));
        assert_eq!(config.context_window, 4096);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(AppConfig::from_vars(vars(&[("CONTEXT_WINDOW", "lots")])).is_err());
        assert!(AppConfig::from_vars(vars(&[("CONTEXT_WINDOW", "0")])).is_err());
    }
}
