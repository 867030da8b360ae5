//! HTTP client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use surge_config::HttpConfig as ConfigHttpConfig;

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,

    /// Whether to verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "Surge/0.1".to_string(),
            verify_ssl: true,
        }
    }
}

impl From<ConfigHttpConfig> for HttpClientConfig {
    fn from(config: ConfigHttpConfig) -> Self {
        Self {
            timeout: config.timeout,
            user_agent: config.user_agent,
            verify_ssl: config.verify_ssl,
        }
    }
}
