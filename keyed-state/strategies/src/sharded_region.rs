// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{ExclusiveRegion, RegionLock};
use keyed_state_core::{
    apply_entries, CoordinationError, PartitionKey, PartitionState, PartitionStore, UpdateBatch,
};
use std::collections::HashMap;

/// One exclusive region per partition.
///
/// Same per-partition atomicity as the sharded processor, but contending
/// producers are ordered by lock acquisition, not by submission.
pub struct ShardedRegion {
    shards: HashMap<PartitionKey, ExclusiveRegion<PartitionState>>,
}

impl ShardedRegion {
    pub fn new(store: PartitionStore, lock: RegionLock) -> Self {
        Self {
            shards: store
                .into_shards()
                .map(|(key, state)| (key, ExclusiveRegion::new(lock, state)))
                .collect(),
        }
    }

    pub async fn submit(&self, batch: UpdateBatch) -> Result<(), CoordinationError> {
        let region = self
            .shards
            .get(batch.partition())
            .ok_or_else(|| CoordinationError::UnknownPartition(batch.partition().clone()))?;
        let (_, entries) = batch.into_parts();
        region.with(|state| apply_entries(state, entries)).await
    }

    pub fn drain(self) -> Result<PartitionStore, CoordinationError> {
        let shards = self
            .shards
            .into_iter()
            .map(|(key, region)| Ok((key, region.into_inner()?)))
            .collect::<Result<Vec<_>, CoordinationError>>()?;
        Ok(PartitionStore::from_shards(shards))
    }
}
