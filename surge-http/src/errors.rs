//! HTTP error types
//!
//! These errors only surface from run-level operations (probing, stats).
//! Submission exchanges never return them; every submission failure becomes
//! a failed outcome instead.

use thiserror::Error;

/// Error type for HTTP operations
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
