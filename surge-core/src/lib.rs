//! Core load-generation engine for surge
//!
//! This crate contains everything between "run parameters in" and "run
//! statistics out": randomized job synthesis, the bounded concurrent
//! dispatcher, the statistics aggregator and the run orchestrator. Talking
//! to the target API lives behind the [`SubmitJob`] trait so the engine can
//! be exercised against stub submitters in tests.

pub mod dispatch;
pub mod error;
pub mod job;
pub mod run;
pub mod stats;
pub mod synth;

// Re-export main types for convenience
pub use dispatch::{Dispatcher, SubmitJob};
pub use error::{DispatchError, RunError, StatsError};
pub use job::{JobKind, JobPayload, JobSpec, Priority, SubmissionOutcome};
pub use run::{execute_run, RunParams, RunReport};
pub use stats::RunStatistics;
pub use synth::JobSynthesizer;
