//! Run orchestration
//!
//! Sequences one load-test run: synthesize the batch, dispatch it
//! concurrently, measure the wall-clock span and aggregate the outcome set.
//! Pre-flight target probing belongs to the caller, which owns the HTTP
//! client; nothing here runs unless the caller decided the target is alive.

use crate::dispatch::{Dispatcher, SubmitJob};
use crate::error::RunError;
use crate::job::SubmissionOutcome;
use crate::stats::RunStatistics;
use crate::synth::JobSynthesizer;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Parameters for one load-test run
#[derive(Debug, Clone)]
pub struct RunParams {
    /// Number of jobs to synthesize and submit
    pub jobs: usize,
    /// Maximum in-flight submissions
    pub concurrency: usize,
    /// Fixed synthesis seed; omit for an entropy-backed batch
    pub seed: Option<u64>,
}

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub statistics: RunStatistics,
    /// Per-submission outcomes, aligned with the synthesized batch
    pub outcomes: Vec<SubmissionOutcome>,
}

/// Execute one complete run against the given submitter
pub async fn execute_run<S>(params: &RunParams, submitter: Arc<S>) -> Result<RunReport, RunError>
where
    S: SubmitJob + 'static,
{
    if params.jobs == 0 {
        return Err(RunError::EmptyBatch);
    }

    let mut concurrency = params.concurrency;
    if concurrency > params.jobs {
        warn!(
            concurrency,
            jobs = params.jobs,
            "concurrency exceeds job count, clamping to job count"
        );
        concurrency = params.jobs;
    }

    let mut synthesizer = match params.seed {
        Some(seed) => JobSynthesizer::from_seed(seed),
        None => JobSynthesizer::new(),
    };
    let specs = synthesizer.synthesize_batch(params.jobs);

    info!(jobs = params.jobs, concurrency, "starting load run");
    let dispatcher = Dispatcher::new(concurrency)?;
    let started = Instant::now();
    let outcomes = dispatcher.dispatch(specs, submitter).await?;
    let wall_clock = started.elapsed();

    let statistics = RunStatistics::aggregate(&outcomes, wall_clock)?;
    info!(
        total = statistics.total,
        succeeded = statistics.succeeded,
        failed = statistics.failed,
        throughput = statistics.throughput,
        "load run complete"
    );

    Ok(RunReport {
        statistics,
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::SubmitJob;
    use crate::job::JobSpec;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingSubmitter {
        submitted: AtomicUsize,
    }

    #[async_trait]
    impl SubmitJob for CountingSubmitter {
        async fn submit(&self, _spec: &JobSpec) -> SubmissionOutcome {
            let n = self.submitted.fetch_add(1, Ordering::SeqCst);
            SubmissionOutcome::success(format!("job-{n}"), 201, Duration::from_millis(5))
        }
    }

    #[tokio::test]
    async fn run_produces_one_outcome_per_synthesized_job() {
        let submitter = Arc::new(CountingSubmitter {
            submitted: AtomicUsize::new(0),
        });
        let params = RunParams {
            jobs: 40,
            concurrency: 4,
            seed: Some(11),
        };

        let report = execute_run(&params, Arc::clone(&submitter)).await.unwrap();

        assert_eq!(report.outcomes.len(), 40);
        assert_eq!(report.statistics.total, 40);
        assert_eq!(report.statistics.succeeded, 40);
        assert_eq!(submitter.submitted.load(Ordering::SeqCst), 40);
    }

    #[tokio::test]
    async fn zero_jobs_aborts_before_any_load() {
        let submitter = Arc::new(CountingSubmitter {
            submitted: AtomicUsize::new(0),
        });
        let params = RunParams {
            jobs: 0,
            concurrency: 4,
            seed: None,
        };

        assert!(matches!(
            execute_run(&params, Arc::clone(&submitter)).await,
            Err(RunError::EmptyBatch)
        ));
        assert_eq!(submitter.submitted.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oversized_concurrency_is_clamped_not_fatal() {
        let submitter = Arc::new(CountingSubmitter {
            submitted: AtomicUsize::new(0),
        });
        let params = RunParams {
            jobs: 3,
            concurrency: 64,
            seed: Some(5),
        };

        let report = execute_run(&params, submitter).await.unwrap();
        assert_eq!(report.outcomes.len(), 3);
    }
}
