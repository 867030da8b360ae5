//! Submission client for the target job-queue API
//!
//! Implements the engine's [`surge_core::SubmitJob`] seam over reqwest, plus
//! the pre-flight health probe and the informational queue-stats fetch.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

// Re-export main types for convenience
pub use client::ApiClient;
pub use config::HttpClientConfig;
pub use errors::HttpError;
pub use types::{JobSubmissionRequest, JobSubmissionResponse, QueueStats};
