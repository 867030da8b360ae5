//! Load shape configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};

/// Batch size, concurrency bound and synthesis seed for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Number of jobs to submit per run
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Maximum in-flight submissions
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Fixed seed for reproducible job synthesis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
            concurrency: default_concurrency(),
            seed: None,
        }
    }
}

impl Validatable for LoadConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.jobs, "jobs", self.domain_name())?;
        validate_positive(self.concurrency, "concurrency", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "load"
    }
}

fn default_jobs() -> usize {
    1000
}

fn default_concurrency() -> usize {
    10
}
