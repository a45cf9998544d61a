// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CoordinationStrategy, ProducerPool, StrategyConfig};
use keyed_state_core::{CoordinationError, PartitionSet, PartitionStore, Workload, WorkloadSource};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Result of one complete run.
#[derive(Debug)]
pub struct RunOutcome {
    pub store: PartitionStore,
    pub producers: usize,
    pub batches_submitted: usize,
    /// Wall time from spawning the producers until the strategy drained
    pub elapsed: Duration,
}

/// Drives a workload through one coordination strategy.
pub struct BenchmarkDriver {
    config: StrategyConfig,
}

impl BenchmarkDriver {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    /// Runs every source to exhaustion and returns the final store.
    ///
    /// Draining only starts once all producers have terminated; any protocol
    /// violation ends the run with an error instead of a store.
    pub async fn run<S>(
        &self,
        partitions: &PartitionSet,
        sources: Vec<S>,
    ) -> Result<RunOutcome, CoordinationError>
    where
        S: WorkloadSource,
    {
        if sources.is_empty() {
            return Err(CoordinationError::InvalidConfig(
                "at least one producer is required".to_string(),
            ));
        }
        if partitions.is_empty() {
            return Err(CoordinationError::InvalidConfig(
                "at least one partition is required".to_string(),
            ));
        }

        let store = PartitionStore::new(partitions);
        let strategy = Arc::new(CoordinationStrategy::new(&self.config, store)?);

        info!(
            strategy = %self.config.kind,
            producers = sources.len(),
            partitions = partitions.len(),
            "run started"
        );
        let started = Instant::now();

        let pool = ProducerPool::spawn(strategy.clone(), sources);
        let report = pool.await_all_producers().await?;
        let store = strategy.drain_and_stop().await?;

        let elapsed = started.elapsed();
        info!(
            strategy = %self.config.kind,
            batches = report.batches_submitted,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "run finished"
        );

        Ok(RunOutcome {
            store,
            producers: report.producers,
            batches_submitted: report.batches_submitted,
            elapsed,
        })
    }

    pub async fn run_workload(&self, workload: Workload) -> Result<RunOutcome, CoordinationError> {
        let (partitions, sources) = workload.into_sources();
        self.run(&partitions, sources).await
    }
}
