// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::utils::{generate_random_key, RANDOM_KEY_LENGTH};
use crate::{CoordinationError, PartitionKey, PartitionSet, UpdateBatch};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Number of batches spread across all producers when not configured.
pub const DEFAULT_TOTAL_BATCHES: usize = 1_000_000;

/// Parameters of a generated workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    pub seed: u64,
    pub num_producers: usize,
    pub num_partitions: usize,
    pub entries_per_batch: usize,
    #[serde(default = "default_total_batches")]
    pub total_batches: usize,
}

fn default_total_batches() -> usize {
    DEFAULT_TOTAL_BATCHES
}

impl WorkloadConfig {
    pub fn validate(&self) -> Result<(), CoordinationError> {
        if self.num_producers == 0 {
            return Err(CoordinationError::InvalidConfig(
                "num_producers must be positive".to_string(),
            ));
        }
        if self.num_partitions == 0 {
            return Err(CoordinationError::InvalidConfig(
                "num_partitions must be positive".to_string(),
            ));
        }
        if self.entries_per_batch == 0 {
            return Err(CoordinationError::InvalidConfig(
                "entries_per_batch must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// A workload already split per producer, ready to be driven.
#[derive(Debug, Clone)]
pub struct Workload {
    partitions: PartitionSet,
    per_producer: Vec<Vec<UpdateBatch>>,
}

impl Workload {
    /// Generates a deterministic workload from the configured seed.
    ///
    /// Every batch is assigned to a uniformly chosen producer and partition
    /// ahead of time, so the run itself does no random work.
    pub fn generate(config: &WorkloadConfig) -> Result<Self, CoordinationError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut seen = HashSet::new();
        let mut partition_keys = Vec::with_capacity(config.num_partitions);
        while partition_keys.len() < config.num_partitions {
            let id = generate_random_key(&mut rng, RANDOM_KEY_LENGTH);
            if seen.insert(id.clone()) {
                partition_keys.push(PartitionKey::from(id));
            }
        }

        let mut per_producer = vec![Vec::new(); config.num_producers];
        for _ in 0..config.total_batches {
            let producer = rng.random_range(0..config.num_producers);
            let partition = partition_keys[rng.random_range(0..config.num_partitions)].clone();
            let entries = (0..config.entries_per_batch)
                .map(|_| {
                    (
                        generate_random_key(&mut rng, RANDOM_KEY_LENGTH),
                        rng.random::<i32>(),
                    )
                })
                .collect();
            per_producer[producer].push(UpdateBatch::new(partition, entries));
        }

        debug!(
            seed = config.seed,
            producers = config.num_producers,
            partitions = config.num_partitions,
            batches = config.total_batches,
            "generated workload"
        );

        Ok(Self {
            partitions: PartitionSet::new(partition_keys),
            per_producer,
        })
    }

    pub fn partitions(&self) -> &PartitionSet {
        &self.partitions
    }

    pub fn num_producers(&self) -> usize {
        self.per_producer.len()
    }

    pub fn batch_count(&self) -> usize {
        self.per_producer.iter().map(Vec::len).sum()
    }

    pub fn batches_for(&self, producer: usize) -> &[UpdateBatch] {
        self.per_producer
            .get(producer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Splits the workload into the partition set and one source per producer.
    pub fn into_sources(self) -> (PartitionSet, Vec<std::vec::IntoIter<UpdateBatch>>) {
        let sources = self.per_producer.into_iter().map(Vec::into_iter).collect();
        (self.partitions, sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> WorkloadConfig {
        WorkloadConfig {
            seed,
            num_producers: 4,
            num_partitions: 8,
            entries_per_batch: 16,
            total_batches: 1_000,
        }
    }

    #[test]
    fn test_workload_has_requested_shape() {
        let workload = Workload::generate(&config(40)).unwrap();

        assert_eq!(workload.partitions().len(), 8);
        assert_eq!(workload.num_producers(), 4);
        assert_eq!(workload.batch_count(), 1_000);
        for producer in 0..4 {
            for batch in workload.batches_for(producer) {
                assert_eq!(batch.len(), 16);
                assert!(workload.partitions().contains(batch.partition()));
            }
        }
    }

    #[test]
    fn test_same_seed_same_workload() {
        let a = Workload::generate(&config(50)).unwrap();
        let b = Workload::generate(&config(50)).unwrap();

        let keys_a: Vec<_> = a.partitions().iter().cloned().collect();
        let keys_b: Vec<_> = b.partitions().iter().cloned().collect();
        assert_eq!(keys_a, keys_b);
        for producer in 0..4 {
            assert_eq!(a.batches_for(producer), b.batches_for(producer));
        }
    }

    #[test]
    fn test_different_seed_different_partitions() {
        let a = Workload::generate(&config(40)).unwrap();
        let b = Workload::generate(&config(50)).unwrap();

        let keys_a: Vec<_> = a.partitions().iter().cloned().collect();
        let keys_b: Vec<_> = b.partitions().iter().cloned().collect();
        assert_ne!(keys_a, keys_b);
    }

    #[test]
    fn test_zero_parameters_are_rejected() {
        let mut bad = config(1);
        bad.num_producers = 0;
        assert!(matches!(
            Workload::generate(&bad),
            Err(CoordinationError::InvalidConfig(_))
        ));

        let mut bad = config(1);
        bad.num_partitions = 0;
        assert!(Workload::generate(&bad).is_err());

        let mut bad = config(1);
        bad.entries_per_batch = 0;
        assert!(Workload::generate(&bad).is_err());
    }

    #[test]
    fn test_into_sources_yields_every_batch_once() {
        let workload = Workload::generate(&config(7)).unwrap();
        let expected = workload.batch_count();

        let (partitions, sources) = workload.into_sources();

        assert_eq!(partitions.len(), 8);
        assert_eq!(sources.len(), 4);
        let drained: usize = sources.into_iter().map(Iterator::count).sum();
        assert_eq!(drained, expected);
    }
}
