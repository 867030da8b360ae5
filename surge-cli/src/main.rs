use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use surge_config::{ConfigLoader, SurgeConfig};
use surge_core::{execute_run, RunParams};
use surge_http::ApiClient;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod report;

use cli::{Cli, Commands, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_ref());

    let loader = ConfigLoader::new();
    let mut config = loader
        .load(cli.config.as_deref())
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Run {
            jobs,
            concurrency,
            seed,
            target,
            output,
        } => {
            apply_run_overrides(&mut config, jobs, concurrency, seed, target);
            config
                .validate_all()
                .context("invalid run parameters")?;
            run(&config, output).await
        }
        Commands::Probe { target } => {
            if let Some(target) = target {
                config.target.base_url = target;
            }
            config.validate_all().context("invalid target")?;
            probe(&config).await
        }
    }
}

/// Fold command-line flags over the loaded configuration
fn apply_run_overrides(
    config: &mut SurgeConfig,
    jobs: Option<usize>,
    concurrency: Option<usize>,
    seed: Option<u64>,
    target: Option<String>,
) {
    if let Some(jobs) = jobs {
        config.load.jobs = jobs;
    }
    if let Some(concurrency) = concurrency {
        config.load.concurrency = concurrency;
    }
    if let Some(seed) = seed {
        config.load.seed = Some(seed);
    }
    if let Some(target) = target {
        config.target.base_url = target;
    }
}

async fn run(config: &SurgeConfig, output: OutputFormat) -> Result<()> {
    let client = ApiClient::new(&config.target.base_url, config.http.clone().into())
        .context("failed to build API client")?;

    // Fail fast before generating any load against a dead target.
    client.check_health().await.with_context(|| {
        format!(
            "target {} is unavailable; is the job-queue API running?",
            config.target.base_url
        )
    })?;
    info!(target = %config.target.base_url, "target is healthy");

    let params = RunParams {
        jobs: config.load.jobs,
        concurrency: config.load.concurrency,
        seed: config.load.seed,
    };
    let client = Arc::new(client);
    let report = execute_run(&params, Arc::clone(&client)).await?;

    match output {
        OutputFormat::Console => {
            report::render_console(&report, params.concurrency.min(params.jobs));
            print_queue_stats(&client).await;
        }
        OutputFormat::Json => {
            let value =
                report::render_json(&report.statistics, params.concurrency.min(params.jobs));
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

async fn probe(config: &SurgeConfig) -> Result<()> {
    let client = ApiClient::new(&config.target.base_url, config.http.clone().into())
        .context("failed to build API client")?;

    client.check_health().await.with_context(|| {
        format!("target {} is unavailable", config.target.base_url)
    })?;
    println!("Target {} is healthy", config.target.base_url);
    print_queue_stats(&client).await;

    Ok(())
}

/// Best-effort, informational only; the run report stands on its own
async fn print_queue_stats(client: &ApiClient) {
    match client.queue_stats().await {
        Ok(stats) => {
            println!("\nQueue Statistics:");
            match serde_json::to_string_pretty(&stats) {
                Ok(rendered) => println!("{rendered}"),
                Err(_) => println!("{stats}"),
            }
        }
        Err(e) => warn!(error = %e, "could not fetch queue statistics"),
    }
}

/// Initialize tracing with environment variable override support
fn init_tracing(log_level: Option<&String>) {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', falling back to 'info'", level);
            EnvFilter::new("info")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
