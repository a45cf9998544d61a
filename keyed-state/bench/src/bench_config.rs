// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::cli::Args;
use keyed_state_core::{WorkloadConfig, DEFAULT_TOTAL_BATCHES};
use keyed_state_strategies::{RegionLock, StrategyConfig, StrategyKind, DEFAULT_INBOX_CAPACITY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Parameter grid of a benchmark sweep. Every list is one axis; the sweep
/// runs the cartesian product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub seeds: Vec<u64>,
    pub producers: Vec<usize>,
    pub partitions: Vec<usize>,
    pub entries_per_batch: Vec<usize>,
    pub strategies: Vec<StrategyKind>,
    pub region_locks: Vec<RegionLock>,
    pub total_batches: usize,
    pub inbox_capacity: usize,
    pub warmup_iterations: usize,
    pub iterations: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            seeds: vec![40, 50],
            producers: vec![1, 2, 4, 8],
            partitions: vec![1, 8],
            entries_per_batch: vec![1, 16],
            strategies: StrategyKind::ALL.to_vec(),
            region_locks: RegionLock::ALL.to_vec(),
            total_batches: DEFAULT_TOTAL_BATCHES,
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
            warmup_iterations: 1,
            iterations: 3,
        }
    }
}

/// One point of the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchCase {
    pub workload: WorkloadConfig,
    pub strategy: StrategyConfig,
}

impl BenchCase {
    /// The lock flavour, if the strategy uses regions at all.
    pub fn region_lock(&self) -> Option<RegionLock> {
        self.strategy
            .kind
            .uses_regions()
            .then_some(self.strategy.region_lock)
    }
}

impl BenchConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: BenchConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Falls back to the default grid when the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Narrows an axis to a single value for every flag given on the command line.
    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(strategy) = args.strategy {
            self.strategies = vec![strategy];
        }
        if let Some(lock) = args.region_lock {
            self.region_locks = vec![lock];
        }
        if let Some(seed) = args.seed {
            self.seeds = vec![seed];
        }
        if let Some(producers) = args.producers {
            self.producers = vec![producers];
        }
        if let Some(partitions) = args.partitions {
            self.partitions = vec![partitions];
        }
        if let Some(entries) = args.entries_per_batch {
            self.entries_per_batch = vec![entries];
        }
        if let Some(total) = args.total_batches {
            self.total_batches = total;
        }
        if let Some(capacity) = args.inbox_capacity {
            self.inbox_capacity = capacity;
        }
        if let Some(iterations) = args.iterations {
            self.iterations = iterations;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let axes = [
            ("seeds", self.seeds.is_empty()),
            ("producers", self.producers.is_empty()),
            ("partitions", self.partitions.is_empty()),
            ("entries_per_batch", self.entries_per_batch.is_empty()),
            ("strategies", self.strategies.is_empty()),
            ("region_locks", self.region_locks.is_empty()),
        ];
        if let Some((name, _)) = axes.iter().find(|(_, empty)| *empty) {
            return Err(format!("'{}' must list at least one value", name));
        }
        if self.iterations == 0 {
            return Err("'iterations' must be positive".to_string());
        }
        Ok(())
    }

    /// Expands the grid. Processor strategies ignore the lock axis and appear
    /// once per workload.
    pub fn cases(&self) -> Vec<BenchCase> {
        let mut cases = Vec::new();
        for &seed in &self.seeds {
            for &num_producers in &self.producers {
                for &num_partitions in &self.partitions {
                    for &entries_per_batch in &self.entries_per_batch {
                        let workload = WorkloadConfig {
                            seed,
                            num_producers,
                            num_partitions,
                            entries_per_batch,
                            total_batches: self.total_batches,
                        };
                        for &kind in &self.strategies {
                            let base = StrategyConfig::new(kind)
                                .with_inbox_capacity(self.inbox_capacity);
                            if kind.uses_regions() {
                                for &lock in &self.region_locks {
                                    cases.push(BenchCase {
                                        workload: workload.clone(),
                                        strategy: base.with_region_lock(lock),
                                    });
                                }
                            } else {
                                cases.push(BenchCase {
                                    workload: workload.clone(),
                                    strategy: base,
                                });
                            }
                        }
                    }
                }
            }
        }
        cases
    }
}
