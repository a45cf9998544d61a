// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::bench_config::{BenchCase, BenchConfig};
use crate::run_report::RunReport;
use keyed_state_core::{CoordinationError, Workload};
use keyed_state_strategies::BenchmarkDriver;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Runs every case of the grid, measuring each one over the configured
/// iterations.
///
/// Cancellation is only checked between runs; a run that has started always
/// drains to completion.
pub async fn run_sweep(
    config: &BenchConfig,
    cancel: &CancellationToken,
) -> Result<Vec<RunReport>, CoordinationError> {
    let cases = config.cases();
    info!(cases = cases.len(), "starting sweep");

    let mut reports = Vec::with_capacity(cases.len());
    for (index, case) in cases.iter().enumerate() {
        if cancel.is_cancelled() {
            warn!(completed = index, "sweep cancelled");
            break;
        }

        if let Some(report) = run_case(case, config, cancel).await? {
            info!(
                case = index + 1,
                of = cases.len(),
                strategy = %report.label(),
                producers = report.producers,
                partitions = report.partitions,
                entries_per_batch = report.entries_per_batch,
                mean_ms = %format!("{:.2}", report.mean_ms),
                batches_per_sec = %format!("{:.0}", report.batches_per_sec),
                "case finished"
            );
            reports.push(report);
        }
    }

    Ok(reports)
}

async fn run_case(
    case: &BenchCase,
    config: &BenchConfig,
    cancel: &CancellationToken,
) -> Result<Option<RunReport>, CoordinationError> {
    let driver = BenchmarkDriver::new(case.strategy);

    let mut samples = Vec::with_capacity(config.iterations);
    let mut batches = 0;
    let mut final_partitions = 0;
    let mut final_keys = 0;

    for iteration in 0..config.warmup_iterations + config.iterations {
        if cancel.is_cancelled() {
            break;
        }

        // Regenerated per iteration, outside the measured section, so only one
        // copy of the workload is ever alive.
        let workload = case_workload(case)?;
        let outcome = driver.run_workload(workload).await?;
        let warmup = iteration < config.warmup_iterations;
        debug!(iteration, warmup, elapsed = ?outcome.elapsed, "iteration finished");

        if !warmup {
            samples.push(outcome.elapsed);
            batches = outcome.batches_submitted;
            final_partitions = outcome.store.len();
            final_keys = outcome.store.total_keys();
        }
    }

    Ok(RunReport::from_samples(
        case,
        batches,
        &samples,
        final_partitions,
        final_keys,
    ))
}

/// The seed makes every call yield the same workload.
fn case_workload(case: &BenchCase) -> Result<Workload, CoordinationError> {
    Workload::generate(&case.workload)
}
