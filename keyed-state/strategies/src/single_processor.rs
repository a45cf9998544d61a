// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::SequentialProcessor;
use keyed_state_core::{CoordinationError, PartitionSet, PartitionStore, UpdateBatch};

/// Every batch, whatever its partition, goes through one inbox and is applied
/// by one consumer task that owns the whole store.
pub struct SingleProcessor {
    partitions: PartitionSet,
    processor: SequentialProcessor<PartitionStore>,
}

impl SingleProcessor {
    pub fn new(store: PartitionStore, capacity: usize) -> Self {
        let partitions = PartitionSet::new(store.partition_keys());
        let processor = SequentialProcessor::spawn(
            "all-partitions",
            capacity,
            store,
            |store: &mut PartitionStore, batch| {
                // Ingress already rejected unknown partitions.
                let applied = store.apply(batch);
                debug_assert!(applied.is_ok(), "{:?}", applied);
            },
        );

        Self {
            partitions,
            processor,
        }
    }

    pub async fn submit(&self, batch: UpdateBatch) -> Result<(), CoordinationError> {
        self.partitions.ensure_known(batch.partition())?;
        self.processor.submit(batch).await
    }

    pub async fn drain(self) -> Result<PartitionStore, CoordinationError> {
        self.processor.drain().await
    }
}
