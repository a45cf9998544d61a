// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod bench_config;
mod cli;
mod run_report;
mod sweep;

use bench_config::BenchConfig;
use clap::Parser;
use cli::Args;
use std::fs;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let start_time = Instant::now();
    let args = Args::parse();

    let mut config = BenchConfig::load_or_default(&args.config);
    config.apply_overrides(&args);
    config.validate()?;

    info!(
        seeds = ?config.seeds,
        producers = ?config.producers,
        partitions = ?config.partitions,
        entries_per_batch = ?config.entries_per_batch,
        strategies = ?config.strategies,
        region_locks = ?config.region_locks,
        total_batches = config.total_batches,
        inbox_capacity = config.inbox_capacity,
        warmup_iterations = config.warmup_iterations,
        iterations = config.iterations,
        "configuration"
    );

    // Ctrl+C stops the sweep once the current run has drained
    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl+C received, stopping after the current run");
            ctrl_c_token.cancel();
        }
    });

    let reports = sweep::run_sweep(&config, &cancel).await?;

    println!(
        "{:<28} {:>9} {:>10} {:>7} {:>12} {:>14}",
        "strategy", "producers", "partitions", "entries", "mean ms", "batches/s"
    );
    for report in &reports {
        println!(
            "{:<28} {:>9} {:>10} {:>7} {:>12.2} {:>14.0}",
            report.label(),
            report.producers,
            report.partitions,
            report.entries_per_batch,
            report.mean_ms,
            report.batches_per_sec
        );
    }

    if let Some(path) = &args.output {
        fs::write(path, serde_json::to_string_pretty(&reports)?)?;
        info!(path = %path.display(), reports = reports.len(), "reports written");
    }

    info!(
        elapsed_s = start_time.elapsed().as_secs_f64(),
        "sweep complete"
    );
    Ok(())
}
