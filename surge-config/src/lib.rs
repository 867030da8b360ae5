//! Layered configuration for the surge load harness
//!
//! Configuration is composed defaults-first: built-in defaults, then an
//! optional YAML file, then `SURGE_*` environment variable overrides, then
//! validation across all domains.

pub mod domains;
pub mod error;
pub mod loader;
pub mod validation;

pub use domains::http::HttpConfig;
pub use domains::load::LoadConfig;
pub use domains::target::TargetConfig;
pub use domains::SurgeConfig;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;
