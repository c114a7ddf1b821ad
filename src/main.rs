//! Primebench - Application Entry Point
//!
//! Loads the run configuration, checks that every declared target binary is
//! present, benchmarks all (target, parameter) pairs, and writes the CSV
//! report. Configuration or missing-binary problems exit non-zero before
//! anything is launched; individual pair failures are logged and never
//! change the exit status.

use std::env;
use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use primebench::{config::Config, constants::DEFAULT_CONFIG_PATH, report, BenchmarkRunner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "primebench=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional first argument overrides the default config path
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    tracing::info!("Loading configuration from {}", config_path.display());
    let config = Config::from_file(&config_path)?;
    tracing::info!(
        "{} target(s) x {} parameter(s), warmup {}x{}s, measure {}x{}s",
        config.binaries.len(),
        config.max_primes.len(),
        config.warmup.iterations,
        config.warmup.timeout_seconds,
        config.measure.iterations,
        config.measure.timeout_seconds,
    );

    let runner = BenchmarkRunner::new(&config);
    runner.verify_targets()?;

    let results = runner.run().await;
    tracing::info!(
        "Completed {} of {} pairs",
        results.len(),
        config.binaries.len() * config.max_primes.len(),
    );

    report::write_report(&config.report_path, &results)?;
    tracing::info!("Report written to {}", config.report_path.display());

    Ok(())
}
