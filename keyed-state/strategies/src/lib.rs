// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod strategy_config;
pub use strategy_config::{RegionLock, StrategyConfig, StrategyKind, DEFAULT_INBOX_CAPACITY};

mod sequential_processor;
pub use sequential_processor::SequentialProcessor;

mod exclusive_region;
pub use exclusive_region::ExclusiveRegion;

mod single_processor;
pub use single_processor::SingleProcessor;

mod sharded_processor;
pub use sharded_processor::ShardedProcessor;

mod single_region;
pub use single_region::SingleRegion;

mod sharded_region;
pub use sharded_region::ShardedRegion;

mod coordination_strategy;
pub use coordination_strategy::CoordinationStrategy;

mod producer_pool;
pub use producer_pool::{ProducerPool, ProducerReport};

mod benchmark_driver;
pub use benchmark_driver::{BenchmarkDriver, RunOutcome};
