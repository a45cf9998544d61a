// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::ValueEnum;
use keyed_state_core::CoordinationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inbox capacity of the sequential processors when none is configured.
pub const DEFAULT_INBOX_CAPACITY: usize = 64;

/// The closed set of coordination strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// One inbox and one consumer task for the whole store
    SingleProcessor,
    /// One inbox and one consumer task per partition
    ShardedProcessor,
    /// One lock around the whole store
    SingleRegion,
    /// One lock per partition
    ShardedRegion,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::SingleProcessor,
        StrategyKind::ShardedProcessor,
        StrategyKind::SingleRegion,
        StrategyKind::ShardedRegion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::SingleProcessor => "single-processor",
            StrategyKind::ShardedProcessor => "sharded-processor",
            StrategyKind::SingleRegion => "single-region",
            StrategyKind::ShardedRegion => "sharded-region",
        }
    }

    /// Processor variants apply batches of one partition in submission order.
    pub fn preserves_submission_order(&self) -> bool {
        matches!(
            self,
            StrategyKind::SingleProcessor | StrategyKind::ShardedProcessor
        )
    }

    pub fn uses_regions(&self) -> bool {
        !self.preserves_submission_order()
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an exclusive region waits for its lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RegionLock {
    /// `std::sync::Mutex`: the waiting worker thread blocks
    #[default]
    Blocking,
    /// `tokio::sync::Mutex`: the waiting task suspends
    Async,
}

impl RegionLock {
    pub const ALL: [RegionLock; 2] = [RegionLock::Blocking, RegionLock::Async];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionLock::Blocking => "blocking",
            RegionLock::Async => "async",
        }
    }
}

impl fmt::Display for RegionLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub kind: StrategyKind,
    #[serde(default = "default_inbox_capacity")]
    pub inbox_capacity: usize,
    #[serde(default)]
    pub region_lock: RegionLock,
}

fn default_inbox_capacity() -> usize {
    DEFAULT_INBOX_CAPACITY
}

impl StrategyConfig {
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
            region_lock: RegionLock::default(),
        }
    }

    pub fn with_inbox_capacity(mut self, inbox_capacity: usize) -> Self {
        self.inbox_capacity = inbox_capacity;
        self
    }

    pub fn with_region_lock(mut self, region_lock: RegionLock) -> Self {
        self.region_lock = region_lock;
        self
    }

    pub fn validate(&self) -> Result<(), CoordinationError> {
        if self.inbox_capacity == 0 {
            return Err(CoordinationError::InvalidConfig(
                "inbox_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
