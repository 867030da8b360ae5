//! Configuration loading and environment variable handling

use crate::domains::SurgeConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::time::Duration;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with the default `SURGE` prefix
    pub fn new() -> Self {
        Self {
            prefix: "SURGE".to_string(),
        }
    }

    /// Create a new config loader with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<SurgeConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: SurgeConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<SurgeConfig> {
        let mut config = SurgeConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<SurgeConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut SurgeConfig) -> ConfigResult<()> {
        if let Ok(url) = self.get_env_var("TARGET_URL") {
            config.target.base_url = url;
        }

        if let Ok(jobs) = self.get_env_var("JOBS") {
            config.load.jobs = jobs
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid JOBS: {}", e)))?;
        }

        if let Ok(concurrency) = self.get_env_var("CONCURRENCY") {
            config.load.concurrency = concurrency
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid CONCURRENCY: {}", e)))?;
        }

        if let Ok(seed) = self.get_env_var("SEED") {
            let seed: u64 = seed
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid SEED: {}", e)))?;
            config.load.seed = Some(seed);
        }

        if let Ok(timeout) = self.get_env_var("HTTP_TIMEOUT") {
            let seconds: u64 = timeout
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid HTTP_TIMEOUT: {}", e)))?;
            config.http.timeout = Duration::from_secs(seconds);
        }

        Ok(())
    }

    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
