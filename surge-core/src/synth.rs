//! Randomized job synthesis
//!
//! Produces one [`JobSpec`] per call from an owned random source. Synthesis
//! cannot fail. The generator is injected at construction so a seeded run
//! reproduces the exact same batch.

use crate::job::{JobKind, JobPayload, JobSpec, Priority};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use uuid::Uuid;

/// Bounds for the sleep-job duration payload, in seconds
const SLEEP_SECONDS_MIN: f64 = 0.1;
const SLEEP_SECONDS_MAX: f64 = 2.0;

/// Probability that a spec carries a positive processing delay
const DELAY_PROBABILITY: f64 = 0.2;

/// Bounds for the delay, in whole seconds, when one is drawn
const DELAY_SECONDS_MIN: u64 = 1;
const DELAY_SECONDS_MAX: u64 = 10;

/// Weighted priority draw: the middle level is three times as likely as
/// either extreme.
const PRIORITY_DRAW: [Priority; 5] = [
    Priority::Low,
    Priority::Normal,
    Priority::Normal,
    Priority::Normal,
    Priority::High,
];

/// Stateless-per-call generator of randomized job specifications
pub struct JobSynthesizer {
    rng: StdRng,
}

impl JobSynthesizer {
    /// Synthesizer backed by OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Synthesizer with a fixed seed, for reproducible batches
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produce one randomized job specification
    pub fn synthesize(&mut self) -> JobSpec {
        let kind = JobKind::ALL[self.rng.random_range(0..JobKind::ALL.len())];
        let payload = match kind {
            JobKind::Echo => JobPayload::Echo {
                message: format!("Test message {}", Uuid::new_v4()),
            },
            JobKind::Sleep => JobPayload::Sleep {
                seconds: self.rng.random_range(SLEEP_SECONDS_MIN..=SLEEP_SECONDS_MAX),
            },
        };

        let priority = PRIORITY_DRAW[self.rng.random_range(0..PRIORITY_DRAW.len())];

        let delay = if self.rng.random_bool(DELAY_PROBABILITY) {
            Duration::from_secs(self.rng.random_range(DELAY_SECONDS_MIN..=DELAY_SECONDS_MAX))
        } else {
            Duration::ZERO
        };

        JobSpec {
            payload,
            priority,
            delay,
        }
    }

    /// Produce a full batch of `count` specifications
    pub fn synthesize_batch(&mut self, count: usize) -> Vec<JobSpec> {
        (0..count).map(|_| self.synthesize()).collect()
    }
}

impl Default for JobSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
