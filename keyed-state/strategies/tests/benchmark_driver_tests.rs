// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use keyed_state_core::{
    CoordinationError, PartitionKey, PartitionSet, PartitionStore, UpdateBatch, Workload,
    WorkloadConfig,
};
use keyed_state_strategies::{BenchmarkDriver, RegionLock, StrategyConfig, StrategyKind};
use std::collections::{HashMap, HashSet};

fn all_configs() -> Vec<StrategyConfig> {
    let mut configs = vec![
        StrategyConfig::new(StrategyKind::SingleProcessor),
        StrategyConfig::new(StrategyKind::ShardedProcessor).with_inbox_capacity(2),
    ];
    for lock in RegionLock::ALL {
        configs.push(StrategyConfig::new(StrategyKind::SingleRegion).with_region_lock(lock));
        configs.push(StrategyConfig::new(StrategyKind::ShardedRegion).with_region_lock(lock));
    }
    configs
}

fn workload_config(num_producers: usize, num_partitions: usize) -> WorkloadConfig {
    WorkloadConfig {
        seed: 40,
        num_producers,
        num_partitions,
        entries_per_batch: 16,
        total_batches: 2_000,
    }
}

fn batch(partition: &str, entries: &[(&str, i32)]) -> UpdateBatch {
    UpdateBatch::new(
        partition,
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
    )
}

/// Every value written per (partition, key), across all producers.
fn written_values(workload: &Workload) -> HashMap<(PartitionKey, String), HashSet<i32>> {
    let mut written: HashMap<(PartitionKey, String), HashSet<i32>> = HashMap::new();
    for producer in 0..workload.num_producers() {
        for batch in workload.batches_for(producer) {
            for (key, value) in batch.entries() {
                written
                    .entry((batch.partition().clone(), key.clone()))
                    .or_default()
                    .insert(*value);
            }
        }
    }
    written
}

// ============================================================
// Example scenarios
// ============================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_producers_two_partitions_scenario() {
    for config in all_configs() {
        let partitions: PartitionSet = ["A", "B"].into_iter().map(PartitionKey::from).collect();
        let sources = vec![
            vec![batch("A", &[("k1", 1)]), batch("A", &[("k1", 2)])].into_iter(),
            vec![batch("B", &[("k1", 9)])].into_iter(),
        ];

        let outcome = BenchmarkDriver::new(config)
            .run(&partitions, sources)
            .await
            .unwrap();

        assert_eq!(outcome.store.get("A", "k1"), Some(2), "{:?}", config);
        assert_eq!(outcome.store.get("B", "k1"), Some(9), "{:?}", config);
        assert_eq!(outcome.producers, 2);
        assert_eq!(outcome.batches_submitted, 3);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unknown_partition_aborts_the_run() {
    for config in all_configs() {
        let partitions: PartitionSet = ["A"].into_iter().map(PartitionKey::from).collect();
        let sources = vec![
            vec![batch("A", &[("k", 1)]), batch("Z", &[("k", 2)])].into_iter(),
            vec![batch("A", &[("k", 3)])].into_iter(),
        ];

        let result = BenchmarkDriver::new(config).run(&partitions, sources).await;

        assert!(
            matches!(
                result,
                Err(CoordinationError::UnknownPartition(ref key)) if key.as_str() == "Z"
            ),
            "{:?}",
            config
        );
    }
}

#[tokio::test]
async fn test_run_requires_producers_and_partitions() {
    let driver = BenchmarkDriver::new(StrategyConfig::new(StrategyKind::SingleRegion));
    let partitions: PartitionSet = ["A"].into_iter().map(PartitionKey::from).collect();

    let no_producers = driver
        .run(&partitions, Vec::<std::vec::IntoIter<UpdateBatch>>::new())
        .await;
    assert!(matches!(no_producers, Err(CoordinationError::InvalidConfig(_))));

    let no_partitions = driver
        .run(&PartitionSet::new([]), vec![Vec::<UpdateBatch>::new().into_iter()])
        .await;
    assert!(matches!(no_partitions, Err(CoordinationError::InvalidConfig(_))));
}

// ============================================================
// Generated workloads
// ============================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_completeness_every_entry_is_reflected() {
    for config in all_configs() {
        let workload = Workload::generate(&workload_config(4, 8)).unwrap();
        let written = written_values(&workload);
        let expected_batches = workload.batch_count();

        let outcome = BenchmarkDriver::new(config)
            .run_workload(workload)
            .await
            .unwrap();

        assert_eq!(outcome.batches_submitted, expected_batches, "{:?}", config);
        assert_eq!(outcome.store.total_keys(), written.len(), "{:?}", config);
        for ((partition, key), values) in &written {
            let value = outcome.store.get(partition.as_str(), key);
            assert!(
                value.is_some_and(|v| values.contains(&v)),
                "{:?}: {}/{} holds {:?}",
                config,
                partition,
                key,
                value
            );
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_partition_set_is_exactly_the_enumerated_set() {
    for config in all_configs() {
        // Few batches over many partitions leaves some partitions untouched.
        let mut settings = workload_config(2, 16);
        settings.total_batches = 5;
        let workload = Workload::generate(&settings).unwrap();
        let mut expected: Vec<PartitionKey> = workload.partitions().iter().cloned().collect();
        expected.sort();

        let outcome = BenchmarkDriver::new(config)
            .run_workload(workload)
            .await
            .unwrap();

        assert_eq!(outcome.store.partition_keys(), expected, "{:?}", config);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_producer_matches_sequential_application() {
    let workload = Workload::generate(&workload_config(1, 4)).unwrap();

    let mut reference = PartitionStore::new(workload.partitions());
    for batch in workload.batches_for(0) {
        reference.apply(batch.clone()).unwrap();
    }

    for config in all_configs() {
        let outcome = BenchmarkDriver::new(config)
            .run_workload(workload.clone())
            .await
            .unwrap();

        assert_eq!(outcome.store, reference, "{:?}", config);
    }
}
