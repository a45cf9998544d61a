// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::SequentialProcessor;
use keyed_state_core::{
    apply_entries, CoordinationError, PartitionKey, PartitionState, PartitionStore, UpdateBatch,
};
use std::collections::HashMap;

/// One inbox and one consumer task per partition.
///
/// Partitions progress in parallel; within a partition batches are applied in
/// the order they were queued.
pub struct ShardedProcessor {
    shards: HashMap<PartitionKey, SequentialProcessor<PartitionState>>,
}

impl ShardedProcessor {
    pub fn new(store: PartitionStore, capacity: usize) -> Self {
        let shards = store
            .into_shards()
            .map(|(key, state)| {
                let processor = SequentialProcessor::spawn(
                    key.to_string(),
                    capacity,
                    state,
                    |state: &mut PartitionState, batch: UpdateBatch| {
                        let (_, entries) = batch.into_parts();
                        apply_entries(state, entries);
                    },
                );
                (key, processor)
            })
            .collect();

        Self { shards }
    }

    pub async fn submit(&self, batch: UpdateBatch) -> Result<(), CoordinationError> {
        match self.shards.get(batch.partition()) {
            Some(processor) => processor.submit(batch).await,
            None => Err(CoordinationError::UnknownPartition(batch.partition().clone())),
        }
    }

    /// Collects each shard once its consumer has applied everything queued.
    pub async fn drain(self) -> Result<PartitionStore, CoordinationError> {
        let mut drained = Vec::with_capacity(self.shards.len());
        for (key, processor) in self.shards {
            drained.push((key, processor.drain().await?));
        }
        Ok(PartitionStore::from_shards(drained))
    }
}
