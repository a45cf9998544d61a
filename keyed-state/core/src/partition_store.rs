// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CoordinationError, PartitionKey, PartitionSet, UpdateBatch};
use std::collections::HashMap;

/// The key/value mapping accumulated by a single partition.
pub type PartitionState = HashMap<String, i32>;

/// Mapping from every enumerated partition to its state.
///
/// The partition set is fixed at construction: applying a batch never creates
/// a partition, and no partition is ever removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartitionStore {
    partitions: HashMap<PartitionKey, PartitionState>,
}

impl PartitionStore {
    /// Creates one empty mapping per enumerated partition.
    pub fn new(partitions: &PartitionSet) -> Self {
        Self {
            partitions: partitions
                .iter()
                .map(|key| (key.clone(), PartitionState::new()))
                .collect(),
        }
    }

    /// Reassembles a store from shards previously split off with
    /// [`PartitionStore::into_shards`].
    pub fn from_shards(shards: impl IntoIterator<Item = (PartitionKey, PartitionState)>) -> Self {
        Self {
            partitions: shards.into_iter().collect(),
        }
    }

    /// Applies every entry of the batch, last write wins.
    ///
    /// An unknown partition leaves the store untouched.
    pub fn apply(&mut self, batch: UpdateBatch) -> Result<(), CoordinationError> {
        let (partition, entries) = batch.into_parts();
        match self.partitions.get_mut(&partition) {
            Some(state) => {
                apply_entries(state, entries);
                Ok(())
            }
            None => Err(CoordinationError::UnknownPartition(partition)),
        }
    }

    pub fn partition(&self, key: &str) -> Option<&PartitionState> {
        self.partitions.get(key)
    }

    pub fn get(&self, partition: &str, key: &str) -> Option<i32> {
        self.partitions.get(partition)?.get(key).copied()
    }

    /// Partition keys in sorted order.
    pub fn partition_keys(&self) -> Vec<PartitionKey> {
        let mut keys: Vec<PartitionKey> = self.partitions.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Number of distinct keys summed over all partitions.
    pub fn total_keys(&self) -> usize {
        self.partitions.values().map(HashMap::len).sum()
    }

    pub fn into_shards(self) -> impl Iterator<Item = (PartitionKey, PartitionState)> {
        self.partitions.into_iter()
    }
}

/// Writes entries in order into one partition's state.
pub fn apply_entries(state: &mut PartitionState, entries: Vec<(String, i32)>) {
    for (key, value) in entries {
        state.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partitions(keys: &[&str]) -> PartitionSet {
        keys.iter().map(|k| PartitionKey::from(*k)).collect()
    }

    fn batch(partition: &str, entries: &[(&str, i32)]) -> UpdateBatch {
        UpdateBatch::new(
            partition,
            entries.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        )
    }

    #[test]
    fn test_new_store_has_one_empty_mapping_per_partition() {
        let store = PartitionStore::new(&partitions(&["A", "B", "C"]));

        assert_eq!(store.len(), 3);
        assert_eq!(store.total_keys(), 0);
        assert!(store.partition("B").is_some_and(|state| state.is_empty()));
    }

    #[test]
    fn test_last_entry_wins_within_batch() {
        let mut store = PartitionStore::new(&partitions(&["A"]));

        store
            .apply(batch("A", &[("x", 1), ("y", 2), ("x", 3)]))
            .unwrap();

        assert_eq!(store.get("A", "x"), Some(3));
        assert_eq!(store.get("A", "y"), Some(2));
    }

    #[test]
    fn test_later_batch_overwrites_earlier() {
        let mut store = PartitionStore::new(&partitions(&["A", "B"]));

        store.apply(batch("A", &[("k1", 1)])).unwrap();
        store.apply(batch("A", &[("k1", 2)])).unwrap();
        store.apply(batch("B", &[("k1", 9)])).unwrap();

        assert_eq!(store.get("A", "k1"), Some(2));
        assert_eq!(store.get("B", "k1"), Some(9));
    }

    #[test]
    fn test_unknown_partition_leaves_store_unchanged() {
        let mut store = PartitionStore::new(&partitions(&["A"]));
        let before = store.clone();

        let result = store.apply(batch("B", &[("k1", 1)]));

        assert_eq!(
            result,
            Err(CoordinationError::UnknownPartition(PartitionKey::from("B")))
        );
        assert_eq!(store, before);
        assert_eq!(store.partition_keys(), vec![PartitionKey::from("A")]);
    }

    #[test]
    fn test_shards_round_trip_through_store() {
        let mut store = PartitionStore::new(&partitions(&["A", "B"]));
        store.apply(batch("B", &[("k", 5)])).unwrap();

        let rebuilt = PartitionStore::from_shards(store.clone().into_shards());

        assert_eq!(rebuilt, store);
    }
}
