//! Error types for the load-generation engine
//!
//! Per-submission failures are never errors here; they are recorded as data
//! in [`crate::job::SubmissionOutcome`]. These types cover the conditions
//! that make a whole run impossible.

use thiserror::Error;

/// Errors from the concurrent dispatcher
///
/// Raised only when the dispatch mechanism itself breaks down. A failed
/// submission is an ordinary outcome, not a `DispatchError`.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Concurrency bound of zero cannot schedule any worker
    #[error("concurrency must be a positive integer")]
    InvalidConcurrency,

    /// A worker task was aborted or panicked before producing an outcome
    #[error("worker task failed to complete: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// The worker pool was torn down while submissions were still queued
    #[error("worker pool closed before all submissions completed")]
    PoolClosed,

    /// A result slot was never filled; indicates a scheduling bug
    #[error("no outcome collected for input index {index}")]
    MissingOutcome { index: usize },
}

/// Errors from the statistics aggregator
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StatsError {
    /// Percentiles and throughput are undefined over zero samples
    #[error("cannot aggregate statistics over an empty outcome set")]
    EmptyOutcomes,
}

/// Errors that abort an entire run
#[derive(Error, Debug)]
pub enum RunError {
    #[error("job count must be a positive integer")]
    EmptyBatch,

    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("aggregation failed: {0}")]
    Stats(#[from] StatsError),
}
