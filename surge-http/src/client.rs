//! HTTP client for the job-queue API
//!
//! One [`ApiClient`] is built per run and shared across the dispatcher's
//! workers. Its [`SubmitJob`] implementation converts every failure mode of
//! the exchange into a failed [`SubmissionOutcome`]; nothing that happens to
//! a single submission can abort the batch.

use crate::config::HttpClientConfig;
use crate::errors::HttpError;
use crate::types::{JobSubmissionRequest, JobSubmissionResponse, QueueStats};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use surge_core::{JobSpec, SubmissionOutcome, SubmitJob};
use tracing::debug;
use url::Url;

/// Client for one target job-queue API endpoint
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    jobs_url: Url,
    stats_url: Url,
    health_url: Url,
}

impl ApiClient {
    /// Build a client for the given base URL
    pub fn new(base_url: &str, config: HttpClientConfig) -> Result<Self, HttpError> {
        let base = Url::parse(base_url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        let join = |path: &str| {
            base.join(path)
                .map_err(|e| HttpError::InvalidUrl(e.to_string()))
        };

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()?;

        Ok(Self {
            client,
            jobs_url: join("/api/jobs")?,
            stats_url: join("/api/stats")?,
            health_url: join("/health")?,
        })
    }

    /// Pre-flight probe; an error here means the target is not accepting
    /// requests and no load should be generated
    pub async fn check_health(&self) -> Result<(), HttpError> {
        let response = self.client.get(self.health_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Fetch queue statistics, for informational reporting only
    pub async fn queue_stats(&self) -> Result<QueueStats, HttpError> {
        let response = self.client.get(self.stats_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    /// One request/response exchange; transport-level failures bubble up to
    /// the caller in `submit`, which turns them into outcomes
    async fn exchange(&self, request: &JobSubmissionRequest) -> Result<(u16, String), reqwest::Error> {
        let response = self
            .client
            .post(self.jobs_url.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl SubmitJob for ApiClient {
    async fn submit(&self, spec: &JobSpec) -> SubmissionOutcome {
        let started = Instant::now();

        let request = match JobSubmissionRequest::from_spec(spec) {
            Ok(request) => request,
            Err(e) => {
                return SubmissionOutcome::failure(
                    format!("failed to encode request: {e}"),
                    0,
                    started.elapsed(),
                )
            }
        };

        // Elapsed covers the full exchange and is taken once, on the shared
        // exit path for both branches.
        let result = self.exchange(&request).await;
        let elapsed = started.elapsed();

        match result {
            Ok((status, body)) => resolve_outcome(status, &body, elapsed),
            Err(e) => {
                debug!(error = %e, "submission never completed");
                SubmissionOutcome::failure(e.to_string(), 0, elapsed)
            }
        }
    }
}

/// Classify a completed exchange into a submission outcome
///
/// An accepted response must both carry a success status and parse into the
/// expected body; anything else is a failure with the raw body as detail.
fn resolve_outcome(status: u16, body: &str, elapsed: Duration) -> SubmissionOutcome {
    if !(200..300).contains(&status) {
        return SubmissionOutcome::failure(body.to_string(), status, elapsed);
    }
    match serde_json::from_str::<JobSubmissionResponse>(body) {
        Ok(response) => SubmissionOutcome::success(response.job_id, status, elapsed),
        Err(e) => SubmissionOutcome::failure(
            format!("malformed acceptance response: {e}"),
            status,
            elapsed,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ELAPSED: Duration = Duration::from_millis(15);

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ApiClient::new("not a url", HttpClientConfig::default());
        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
    }

    #[test]
    fn routes_derive_from_base_url() {
        let client = ApiClient::new("http://localhost:8080", HttpClientConfig::default()).unwrap();
        assert_eq!(client.jobs_url.as_str(), "http://localhost:8080/api/jobs");
        assert_eq!(client.stats_url.as_str(), "http://localhost:8080/api/stats");
        assert_eq!(client.health_url.as_str(), "http://localhost:8080/health");
    }

    #[test]
    fn accepted_response_resolves_to_success() {
        let outcome = resolve_outcome(201, r#"{"job_id":"j-9","status":"pending"}"#, ELAPSED);
        assert!(outcome.succeeded);
        assert_eq!(outcome.job_id.as_deref(), Some("j-9"));
        assert_eq!(outcome.status_code, 201);
        assert_eq!(outcome.elapsed, ELAPSED);
    }

    #[test]
    fn rejection_keeps_raw_body_and_real_status() {
        let outcome = resolve_outcome(400, "Job type and payload are required", ELAPSED);
        assert!(!outcome.succeeded);
        assert_eq!(
            outcome.failure_detail.as_deref(),
            Some("Job type and payload are required")
        );
        assert_eq!(outcome.status_code, 400);
        assert!(outcome.job_id.is_none());
    }

    #[test]
    fn malformed_acceptance_body_is_a_failure() {
        let outcome = resolve_outcome(201, "<html>gateway</html>", ELAPSED);
        assert!(!outcome.succeeded);
        assert_eq!(outcome.status_code, 201);
        assert!(outcome
            .failure_detail
            .as_deref()
            .unwrap()
            .starts_with("malformed acceptance response"));
    }

    #[tokio::test]
    async fn unreachable_target_becomes_failed_outcome_not_error() {
        // Reserved TEST-NET-1 address; connections fail fast without a
        // listening server.
        let config = HttpClientConfig {
            timeout: Duration::from_millis(500),
            ..HttpClientConfig::default()
        };
        let client = ApiClient::new("http://192.0.2.1:9", config).unwrap();

        let spec = JobSpec {
            payload: surge_core::JobPayload::Echo {
                message: "unreachable".to_string(),
            },
            priority: surge_core::Priority::Normal,
            delay: Duration::ZERO,
        };

        let outcome = client.submit(&spec).await;
        assert!(!outcome.succeeded);
        assert_eq!(outcome.status_code, 0);
        assert!(outcome.failure_detail.is_some());
    }
}
