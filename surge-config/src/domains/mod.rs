//! Domain-specific configuration modules

pub mod http;
pub mod load;
pub mod target;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Root configuration for the surge harness
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SurgeConfig {
    /// Target job-queue API
    pub target: target::TargetConfig,

    /// Load shape: batch size, concurrency, synthesis seed
    pub load: load::LoadConfig,

    /// HTTP client behaviour
    pub http: http::HttpConfig,
}

impl SurgeConfig {
    /// Validate every configuration domain
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.target.validate()?;
        self.load.validate()?;
        self.http.validate()?;
        Ok(())
    }
}
