// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::PartitionKey;

/// An immutable group of key/value writes destined for one partition.
///
/// Entries keep their submission order; when a key repeats the later entry
/// wins once the batch is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateBatch {
    partition: PartitionKey,
    entries: Vec<(String, i32)>,
}

impl UpdateBatch {
    pub fn new(partition: impl Into<PartitionKey>, entries: Vec<(String, i32)>) -> Self {
        Self {
            partition: partition.into(),
            entries,
        }
    }

    pub fn partition(&self) -> &PartitionKey {
        &self.partition
    }

    pub fn entries(&self) -> &[(String, i32)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the batch, handing its entries to whoever applies them.
    pub fn into_parts(self) -> (PartitionKey, Vec<(String, i32)>) {
        (self.partition, self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_keeps_entry_order() {
        let batch = UpdateBatch::new(
            "A",
            vec![("k1".to_string(), 1), ("k2".to_string(), 2), ("k1".to_string(), 3)],
        );

        assert_eq!(batch.partition().as_str(), "A");
        assert_eq!(batch.len(), 3);
        let keys: Vec<&str> = batch.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["k1", "k2", "k1"]);
    }

    #[test]
    fn test_empty_batch() {
        let batch = UpdateBatch::new("A", Vec::new());
        assert!(batch.is_empty());

        let (partition, entries) = batch.into_parts();
        assert_eq!(partition, PartitionKey::from("A"));
        assert!(entries.is_empty());
    }
}
