//! Report rendering for completed runs

use serde_json::json;
use surge_core::{RunReport, RunStatistics};

/// How many failure details to surface in the console report
const FAILURE_SAMPLE: usize = 3;

/// Render the human-readable console report
pub fn render_console(report: &RunReport, concurrency: usize) {
    let stats = &report.statistics;

    println!("\n--- Load Test Results ---");
    println!("Total Jobs: {}", stats.total);
    println!("Concurrency: {}", concurrency);
    println!("Total Time: {:.2} seconds", stats.wall_clock.as_secs_f64());
    println!(
        "Success Rate: {}/{} ({:.2}%)",
        stats.succeeded,
        stats.total,
        stats.success_rate * 100.0
    );
    println!("\nTiming Statistics (seconds):");
    println!("  Average: {:.4}", stats.mean.as_secs_f64());
    println!("  Median: {:.4}", stats.median.as_secs_f64());
    println!("  Min: {:.4}", stats.min.as_secs_f64());
    println!("  Max: {:.4}", stats.max.as_secs_f64());
    println!("  90th Percentile: {:.4}", stats.p90.as_secs_f64());
    println!("  95th Percentile: {:.4}", stats.p95.as_secs_f64());
    println!("  99th Percentile: {:.4}", stats.p99.as_secs_f64());
    println!("\nThroughput: {:.2} jobs/second", stats.throughput);

    if stats.failed > 0 {
        println!("\nFailure sample:");
        for outcome in report
            .outcomes
            .iter()
            .filter(|o| !o.succeeded)
            .take(FAILURE_SAMPLE)
        {
            println!(
                "  [status {}] {}",
                outcome.status_code,
                outcome.failure_detail.as_deref().unwrap_or("unknown")
            );
        }
    }
}

/// Build the machine-readable JSON report
pub fn render_json(statistics: &RunStatistics, concurrency: usize) -> serde_json::Value {
    json!({
        "concurrency": concurrency,
        "statistics": statistics,
    })
}
