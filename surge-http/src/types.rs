//! Wire types for the job-queue API
//!
//! Shapes mirror the server contract: jobs are POSTed with a string
//! `payload` field (JSON-encoded per-kind data), and acceptance comes back
//! as `201 Created` with the assigned job id.

use serde::{Deserialize, Serialize};
use surge_core::JobSpec;

/// Request body for `POST /api/jobs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSubmissionRequest {
    #[serde(rename = "type")]
    pub job_type: String,

    /// JSON-encoded kind-specific payload; the server treats this as an
    /// opaque string
    pub payload: String,

    pub priority: i32,

    /// Seconds before the job becomes eligible for processing
    #[serde(skip_serializing_if = "is_zero", default)]
    pub delay_seconds: u64,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

impl JobSubmissionRequest {
    /// Build the wire request for one synthesized spec
    pub fn from_spec(spec: &JobSpec) -> Result<Self, serde_json::Error> {
        Ok(Self {
            job_type: spec.kind().as_str().to_string(),
            payload: serde_json::to_string(&spec.payload)?,
            priority: spec.priority.as_i32(),
            delay_seconds: spec.delay.as_secs(),
        })
    }
}

/// Response body for an accepted job submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSubmissionResponse {
    pub job_id: String,
    pub status: String,
}

/// Queue statistics from `GET /api/stats`, passed through untyped
///
/// Purely informational; nothing in the harness consumes individual fields.
pub type QueueStats = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use surge_core::{JobPayload, Priority};

    #[test]
    fn echo_request_matches_server_contract() {
        let spec = JobSpec {
            payload: JobPayload::Echo {
                message: "Test message abc".to_string(),
            },
            priority: Priority::Normal,
            delay: Duration::ZERO,
        };

        let request = JobSubmissionRequest::from_spec(&spec).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["type"], "echo");
        assert_eq!(json["priority"], 2);
        assert_eq!(json["payload"], r#"{"message":"Test message abc"}"#);
        // Zero delay stays off the wire entirely.
        assert!(json.get("delay_seconds").is_none());
    }

    #[test]
    fn sleep_request_carries_delay_and_encoded_seconds() {
        let spec = JobSpec {
            payload: JobPayload::Sleep { seconds: 1.5 },
            priority: Priority::High,
            delay: Duration::from_secs(4),
        };

        let request = JobSubmissionRequest::from_spec(&spec).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["type"], "sleep");
        assert_eq!(json["priority"], 3);
        assert_eq!(json["delay_seconds"], 4);

        let payload: serde_json::Value = serde_json::from_str(json["payload"].as_str().unwrap()).unwrap();
        assert_eq!(payload["seconds"], 1.5);
    }

    #[test]
    fn submission_response_parses_server_reply() {
        let body = r#"{"job_id":"a1b2c3","status":"pending"}"#;
        let response: JobSubmissionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.job_id, "a1b2c3");
        assert_eq!(response.status, "pending");
    }
}
