// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{ExclusiveRegion, RegionLock};
use keyed_state_core::{CoordinationError, PartitionSet, PartitionStore, UpdateBatch};

/// One exclusive region guarding the entire store.
pub struct SingleRegion {
    partitions: PartitionSet,
    region: ExclusiveRegion<PartitionStore>,
}

impl SingleRegion {
    pub fn new(store: PartitionStore, lock: RegionLock) -> Self {
        Self {
            partitions: PartitionSet::new(store.partition_keys()),
            region: ExclusiveRegion::new(lock, store),
        }
    }

    /// Applies the batch while holding the region for its full length.
    pub async fn submit(&self, batch: UpdateBatch) -> Result<(), CoordinationError> {
        self.partitions.ensure_known(batch.partition())?;
        self.region.with(|store| store.apply(batch)).await?
    }

    pub fn drain(self) -> Result<PartitionStore, CoordinationError> {
        self.region.into_inner()
    }
}
