//! Bounded concurrent dispatch of a job batch
//!
//! The dispatcher fans a fixed batch of specs out across at most
//! `concurrency` in-flight submissions and collects exactly one outcome per
//! input, positionally aligned with it. Results are written into an indexed
//! slot vector rather than gathered in completion order, so the alignment
//! guarantee holds no matter which worker finishes first.

use crate::error::DispatchError;
use crate::job::{JobSpec, SubmissionOutcome};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Seam between the engine and whatever performs one submission exchange
///
/// Implementations must convert every failure mode into a
/// [`SubmissionOutcome`]; the signature leaves them no error channel, which
/// is what keeps the dispatcher's batch loss-free.
#[async_trait]
pub trait SubmitJob: Send + Sync {
    async fn submit(&self, spec: &JobSpec) -> SubmissionOutcome;
}

/// Order-preserving concurrent dispatcher with a fixed in-flight bound
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    concurrency: usize,
}

impl Dispatcher {
    pub fn new(concurrency: usize) -> Result<Self, DispatchError> {
        if concurrency == 0 {
            return Err(DispatchError::InvalidConcurrency);
        }
        Ok(Self { concurrency })
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Submit every spec and return one outcome per input, in input order
    ///
    /// Individual submission failures are ordinary data in the returned
    /// vector. An `Err` here means the dispatch mechanism itself broke down
    /// and the run cannot produce a complete batch.
    pub async fn dispatch<S>(
        &self,
        specs: Vec<JobSpec>,
        submitter: Arc<S>,
    ) -> Result<Vec<SubmissionOutcome>, DispatchError>
    where
        S: SubmitJob + 'static,
    {
        let total = specs.len();
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut workers = JoinSet::new();

        for (index, spec) in specs.into_iter().enumerate() {
            let permits = Arc::clone(&permits);
            let submitter = Arc::clone(&submitter);
            workers.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|_| DispatchError::PoolClosed)?;
                let outcome = submitter.submit(&spec).await;
                Ok::<_, DispatchError>((index, outcome))
            });
        }

        let mut slots: Vec<Option<SubmissionOutcome>> = Vec::with_capacity(total);
        slots.resize_with(total, || None);

        while let Some(joined) = workers.join_next().await {
            let (index, outcome) = joined??;
            // Each worker owns exactly one slot; a second write here would
            // mean duplicated outcomes.
            debug_assert!(slots[index].is_none());
            slots[index] = Some(outcome);
        }
        debug!(total, concurrency = self.concurrency, "batch dispatch complete");

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(DispatchError::MissingOutcome { index }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{JobPayload, Priority};
    use std::time::{Duration, Instant};

    fn spec_with_message(message: &str) -> JobSpec {
        JobSpec {
            payload: JobPayload::Echo {
                message: message.to_string(),
            },
            priority: Priority::Normal,
            delay: Duration::ZERO,
        }
    }

    /// Succeeds or fails per spec, echoing the input message as the job id
    /// so positional alignment is observable.
    struct EchoingSubmitter {
        fail_everything: bool,
        pause: Duration,
    }

    #[async_trait]
    impl SubmitJob for EchoingSubmitter {
        async fn submit(&self, spec: &JobSpec) -> SubmissionOutcome {
            if !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }
            let message = match &spec.payload {
                JobPayload::Echo { message } => message.clone(),
                JobPayload::Sleep { seconds } => format!("sleep-{seconds}"),
            };
            if self.fail_everything {
                SubmissionOutcome::failure(message, 500, Duration::from_millis(1))
            } else {
                SubmissionOutcome::success(message, 201, Duration::from_millis(1))
            }
        }
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        assert!(matches!(
            Dispatcher::new(0),
            Err(DispatchError::InvalidConcurrency)
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn outcomes_align_with_inputs_under_concurrency() {
        let specs: Vec<JobSpec> = (0..200).map(|i| spec_with_message(&format!("job-{i}"))).collect();
        let submitter = Arc::new(EchoingSubmitter {
            fail_everything: false,
            pause: Duration::from_millis(1),
        });

        let dispatcher = Dispatcher::new(8).unwrap();
        let outcomes = dispatcher.dispatch(specs, submitter).await.unwrap();

        assert_eq!(outcomes.len(), 200);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.job_id.as_deref(), Some(format!("job-{i}").as_str()));
        }
    }

    #[tokio::test]
    async fn all_failures_lose_no_outcomes() {
        let specs: Vec<JobSpec> = (0..50).map(|i| spec_with_message(&format!("job-{i}"))).collect();
        let submitter = Arc::new(EchoingSubmitter {
            fail_everything: true,
            pause: Duration::ZERO,
        });

        let outcomes = Dispatcher::new(4)
            .unwrap()
            .dispatch(specs, submitter)
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 50);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert!(!outcome.succeeded);
            assert_eq!(
                outcome.failure_detail.as_deref(),
                Some(format!("job-{i}").as_str())
            );
        }
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_outcomes() {
        let submitter = Arc::new(EchoingSubmitter {
            fail_everything: false,
            pause: Duration::ZERO,
        });
        let outcomes = Dispatcher::new(2)
            .unwrap()
            .dispatch(Vec::new(), submitter)
            .await
            .unwrap();
        assert!(outcomes.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn pool_actually_parallelizes() {
        let pause = Duration::from_millis(50);
        let jobs = 8usize;
        let submitter = Arc::new(EchoingSubmitter {
            fail_everything: false,
            pause,
        });

        let specs: Vec<JobSpec> = (0..jobs).map(|i| spec_with_message(&format!("p-{i}"))).collect();
        let started = Instant::now();
        Dispatcher::new(jobs)
            .unwrap()
            .dispatch(specs, Arc::clone(&submitter))
            .await
            .unwrap();
        let parallel = started.elapsed();

        let specs: Vec<JobSpec> = (0..jobs).map(|i| spec_with_message(&format!("s-{i}"))).collect();
        let started = Instant::now();
        Dispatcher::new(1)
            .unwrap()
            .dispatch(specs, submitter)
            .await
            .unwrap();
        let serialized = started.elapsed();

        // Fully parallel should approximate one pause; fully serialized
        // approximates jobs * pause. Generous margins keep this stable on
        // loaded CI machines.
        assert!(parallel < pause * 4, "parallel run took {parallel:?}");
        assert!(
            serialized >= pause * (jobs as u32 - 1),
            "serialized run took only {serialized:?}"
        );
        assert!(serialized > parallel);
    }
}
