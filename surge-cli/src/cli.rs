//! CLI argument parsing definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Load-generation harness for job-queue APIs", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one load-test batch against the target
    Run {
        /// Number of jobs to submit
        #[arg(long, value_name = "COUNT")]
        jobs: Option<usize>,

        /// Maximum in-flight submissions
        #[arg(long, value_name = "COUNT")]
        concurrency: Option<usize>,

        /// Fixed seed for reproducible job synthesis
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Target API base URL
        #[arg(long, value_name = "URL")]
        target: Option<String>,

        /// Report output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
        output: OutputFormat,
    },

    /// Probe the target's health and queue statistics without generating load
    Probe {
        /// Target API base URL
        #[arg(long, value_name = "URL")]
        target: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console report
    Console,
    /// Machine-readable JSON report
    Json,
}
