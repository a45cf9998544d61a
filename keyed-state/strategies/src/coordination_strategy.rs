// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    ShardedProcessor, ShardedRegion, SingleProcessor, SingleRegion, StrategyConfig, StrategyKind,
};
use async_trait::async_trait;
use keyed_state_core::{BatchSink, CoordinationError, PartitionStore, UpdateBatch};
use std::sync::Arc;
use tracing::debug;

/// The selected coordination strategy, owning the partition store for the
/// duration of a run.
///
/// Nothing outside the strategy holds a reference to the store: producers
/// only reach it through [`BatchSink::submit`], and the final state is only
/// handed out by [`CoordinationStrategy::drain_and_stop`].
pub enum CoordinationStrategy {
    SingleProcessor(SingleProcessor),
    ShardedProcessor(ShardedProcessor),
    SingleRegion(SingleRegion),
    ShardedRegion(ShardedRegion),
}

impl CoordinationStrategy {
    /// Takes ownership of `store` and starts whatever consumer tasks the
    /// selected variant needs. Must be called inside a tokio runtime.
    pub fn new(config: &StrategyConfig, store: PartitionStore) -> Result<Self, CoordinationError> {
        config.validate()?;
        debug!(
            strategy = %config.kind,
            partitions = store.len(),
            inbox_capacity = config.inbox_capacity,
            region_lock = %config.region_lock,
            "building coordination strategy"
        );

        let strategy = match config.kind {
            StrategyKind::SingleProcessor => CoordinationStrategy::SingleProcessor(
                SingleProcessor::new(store, config.inbox_capacity),
            ),
            StrategyKind::ShardedProcessor => CoordinationStrategy::ShardedProcessor(
                ShardedProcessor::new(store, config.inbox_capacity),
            ),
            StrategyKind::SingleRegion => {
                CoordinationStrategy::SingleRegion(SingleRegion::new(store, config.region_lock))
            }
            StrategyKind::ShardedRegion => {
                CoordinationStrategy::ShardedRegion(ShardedRegion::new(store, config.region_lock))
            }
        };
        Ok(strategy)
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            CoordinationStrategy::SingleProcessor(_) => StrategyKind::SingleProcessor,
            CoordinationStrategy::ShardedProcessor(_) => StrategyKind::ShardedProcessor,
            CoordinationStrategy::SingleRegion(_) => StrategyKind::SingleRegion,
            CoordinationStrategy::ShardedRegion(_) => StrategyKind::ShardedRegion,
        }
    }

    /// Waits until every submitted batch is applied, stops the consumer
    /// tasks and returns the final store.
    ///
    /// Fails with `ProducersStillActive` when any other handle to the
    /// strategy is still alive, i.e. some producer could still submit.
    pub async fn drain_and_stop(self: Arc<Self>) -> Result<PartitionStore, CoordinationError> {
        let strategy = Arc::try_unwrap(self)
            .map_err(|shared| CoordinationError::ProducersStillActive(Arc::strong_count(&shared) - 1))?;
        let kind = strategy.kind();

        let store = match strategy {
            CoordinationStrategy::SingleProcessor(processor) => processor.drain().await?,
            CoordinationStrategy::ShardedProcessor(processor) => processor.drain().await?,
            CoordinationStrategy::SingleRegion(region) => region.drain()?,
            CoordinationStrategy::ShardedRegion(region) => region.drain()?,
        };

        debug!(strategy = %kind, keys = store.total_keys(), "strategy drained");
        Ok(store)
    }
}

#[async_trait]
impl BatchSink for CoordinationStrategy {
    async fn submit(&self, batch: UpdateBatch) -> Result<(), CoordinationError> {
        match self {
            CoordinationStrategy::SingleProcessor(processor) => processor.submit(batch).await,
            CoordinationStrategy::ShardedProcessor(processor) => processor.submit(batch).await,
            CoordinationStrategy::SingleRegion(region) => region.submit(batch).await,
            CoordinationStrategy::ShardedRegion(region) => region.submit(batch).await,
        }
    }
}
