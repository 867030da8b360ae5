//! Job specifications and submission outcomes
//!
//! A [`JobSpec`] is one synthesized unit of load-test work; a
//! [`SubmissionOutcome`] is the one-to-one result of submitting it. Both are
//! write-once: specs are handed by value to workers and outcomes are only
//! read after collection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Supported job kinds on the target queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    /// Echo a message payload back
    Echo,
    /// Sleep for a payload-specified number of seconds
    Sleep,
}

impl JobKind {
    /// All kinds the synthesizer draws from
    pub const ALL: [JobKind; 2] = [JobKind::Echo, JobKind::Sleep];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Echo => "echo",
            JobKind::Sleep => "sleep",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific job payload
///
/// The payload is the kind-indexed union: a spec cannot carry data whose
/// shape disagrees with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobPayload {
    Echo { message: String },
    Sleep { seconds: f64 },
}

impl JobPayload {
    pub fn kind(&self) -> JobKind {
        match self {
            JobPayload::Echo { .. } => JobKind::Echo,
            JobPayload::Sleep { .. } => JobKind::Sleep,
        }
    }
}

/// Job priority ladder understood by the target queue
///
/// The queue accepts levels 1..=4; the harness submits the low/normal/high
/// subset, drawn with the middle value weighted highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
}

impl Priority {
    pub fn as_i32(&self) -> i32 {
        match self {
            Priority::Low => 1,
            Priority::Normal => 2,
            Priority::High => 3,
        }
    }
}

/// One synthesized unit of work to submit against the target queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    pub payload: JobPayload,
    pub priority: Priority,
    /// Time before the job becomes eligible for processing; zero for most
    /// specs
    pub delay: Duration,
}

impl JobSpec {
    pub fn kind(&self) -> JobKind {
        self.payload.kind()
    }
}

/// The result of submitting exactly one [`JobSpec`]
///
/// Exactly one outcome exists per submitted spec. Transport failures and
/// application rejections both land here as data; nothing about a single
/// submission is ever an error for the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub succeeded: bool,
    /// Identifier assigned by the target queue, present only on success
    pub job_id: Option<String>,
    /// Diagnostic text, present only on failure
    pub failure_detail: Option<String>,
    /// Protocol status, or 0 when the request never reached the transport
    pub status_code: u16,
    /// Wall-clock duration from request issuance to outcome resolution
    pub elapsed: Duration,
}

impl SubmissionOutcome {
    pub fn success(job_id: String, status_code: u16, elapsed: Duration) -> Self {
        Self {
            succeeded: true,
            job_id: Some(job_id),
            failure_detail: None,
            status_code,
            elapsed,
        }
    }

    pub fn failure(detail: String, status_code: u16, elapsed: Duration) -> Self {
        Self {
            succeeded: false,
            job_id: None,
            failure_detail: Some(detail),
            status_code,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_kind_matches_variant() {
        let echo = JobPayload::Echo {
            message: "hello".to_string(),
        };
        let sleep = JobPayload::Sleep { seconds: 0.5 };
        assert_eq!(echo.kind(), JobKind::Echo);
        assert_eq!(sleep.kind(), JobKind::Sleep);
    }

    #[test]
    fn priority_maps_to_queue_levels() {
        assert_eq!(Priority::Low.as_i32(), 1);
        assert_eq!(Priority::Normal.as_i32(), 2);
        assert_eq!(Priority::High.as_i32(), 3);
    }

    #[test]
    fn outcome_constructors_keep_field_correlation() {
        let ok = SubmissionOutcome::success("job-1".to_string(), 201, Duration::from_millis(12));
        assert!(ok.succeeded);
        assert_eq!(ok.job_id.as_deref(), Some("job-1"));
        assert!(ok.failure_detail.is_none());

        let failed =
            SubmissionOutcome::failure("connection refused".to_string(), 0, Duration::from_millis(3));
        assert!(!failed.succeeded);
        assert!(failed.job_id.is_none());
        assert_eq!(failed.failure_detail.as_deref(), Some("connection refused"));
        assert_eq!(failed.status_code, 0);
    }
}
