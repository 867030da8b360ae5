//! Statistics aggregation over a completed batch
//!
//! Reduces the full outcome set of one run into counts, a latency
//! distribution and throughput. Percentiles use the nearest-rank policy the
//! wider tooling expects: sort ascending, take the value at index
//! `floor(p * count)`. That is a deliberately simple definition; do not
//! swap in an interpolated method.

use crate::error::StatsError;
use crate::job::SubmissionOutcome;
use serde::{Serialize, Serializer};
use std::time::Duration;

fn duration_secs<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}

/// Aggregate statistics for one run, immutable once computed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStatistics {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Fraction of submissions that succeeded, in [0, 1]
    pub success_rate: f64,
    #[serde(serialize_with = "duration_secs")]
    pub mean: Duration,
    #[serde(serialize_with = "duration_secs")]
    pub median: Duration,
    #[serde(serialize_with = "duration_secs")]
    pub min: Duration,
    #[serde(serialize_with = "duration_secs")]
    pub max: Duration,
    #[serde(serialize_with = "duration_secs")]
    pub p90: Duration,
    #[serde(serialize_with = "duration_secs")]
    pub p95: Duration,
    #[serde(serialize_with = "duration_secs")]
    pub p99: Duration,
    /// Wall-clock span of the whole batch, first dispatch to last outcome
    #[serde(serialize_with = "duration_secs")]
    pub wall_clock: Duration,
    /// Jobs per second over the wall-clock span, not the summed durations
    pub throughput: f64,
}

impl RunStatistics {
    /// Reduce a complete, non-empty outcome set into run statistics
    ///
    /// `wall_clock` is the measured span from the first submission's
    /// issuance to the last outcome's resolution; under concurrency it has
    /// no fixed relation to the sum of individual elapsed times.
    pub fn aggregate(
        outcomes: &[SubmissionOutcome],
        wall_clock: Duration,
    ) -> Result<Self, StatsError> {
        if outcomes.is_empty() {
            return Err(StatsError::EmptyOutcomes);
        }

        let total = outcomes.len();
        let succeeded = outcomes.iter().filter(|o| o.succeeded).count();

        let mut durations: Vec<Duration> = outcomes.iter().map(|o| o.elapsed).collect();
        durations.sort_unstable();

        let sum: Duration = durations.iter().sum();
        let mean = sum / total as u32;
        let median = if total % 2 == 0 {
            (durations[total / 2 - 1] + durations[total / 2]) / 2
        } else {
            durations[total / 2]
        };

        let span_secs = wall_clock.as_secs_f64();
        let throughput = if span_secs <= f64::EPSILON {
            0.0
        } else {
            total as f64 / span_secs
        };

        Ok(Self {
            total,
            succeeded,
            failed: total - succeeded,
            success_rate: succeeded as f64 / total as f64,
            mean,
            median,
            min: durations[0],
            max: durations[total - 1],
            p90: nearest_rank(&durations, 0.90),
            p95: nearest_rank(&durations, 0.95),
            p99: nearest_rank(&durations, 0.99),
            wall_clock,
            throughput,
        })
    }
}

/// Nearest-rank percentile over an ascending-sorted, non-empty sample
///
/// `floor(p * count)` can only reach `count` at p >= 1.0, but the clamp is
/// kept explicit rather than relying on that.
fn nearest_rank(sorted: &[Duration], p: f64) -> Duration {
    let index = ((p * sorted.len() as f64).floor() as usize).min(sorted.len() - 1);
    sorted[index]
}
