// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::bench_config::BenchCase;
use keyed_state_strategies::{RegionLock, StrategyKind};
use serde::Serialize;
use std::time::Duration;

/// Timing summary of one parameter combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub strategy: StrategyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_lock: Option<RegionLock>,
    pub seed: u64,
    pub producers: usize,
    pub partitions: usize,
    pub entries_per_batch: usize,
    pub batches: usize,
    pub iterations: usize,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub batches_per_sec: f64,
    pub final_partitions: usize,
    pub final_keys: usize,
}

impl RunReport {
    /// Summarizes the measured iterations of `case`. Returns `None` when
    /// nothing was measured.
    pub fn from_samples(
        case: &BenchCase,
        batches: usize,
        samples: &[Duration],
        final_partitions: usize,
        final_keys: usize,
    ) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let millis: Vec<f64> = samples.iter().map(|d| d.as_secs_f64() * 1000.0).collect();
        let mean_ms = millis.iter().sum::<f64>() / millis.len() as f64;
        let min_ms = millis.iter().copied().fold(f64::INFINITY, f64::min);
        let max_ms = millis.iter().copied().fold(0.0, f64::max);
        let batches_per_sec = if mean_ms > 0.0 {
            batches as f64 / (mean_ms / 1000.0)
        } else {
            0.0
        };

        Some(Self {
            strategy: case.strategy.kind,
            region_lock: case.region_lock(),
            seed: case.workload.seed,
            producers: case.workload.num_producers,
            partitions: case.workload.num_partitions,
            entries_per_batch: case.workload.entries_per_batch,
            batches,
            iterations: samples.len(),
            mean_ms,
            min_ms,
            max_ms,
            batches_per_sec,
            final_partitions,
            final_keys,
        })
    }

    /// Strategy name including the lock flavour, e.g. `sharded-region/async`.
    pub fn label(&self) -> String {
        match self.region_lock {
            Some(lock) => format!("{}/{}", self.strategy, lock),
            None => self.strategy.to_string(),
        }
    }
}
