// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::Parser;
use keyed_state_strategies::{RegionLock, StrategyKind};
use std::path::PathBuf;

/// Benchmarks strategies for coordinating concurrent writers against
/// partitioned key/value state.
#[derive(Debug, Parser)]
#[command(name = "keyed-state-bench", version)]
pub struct Args {
    /// JSON file describing the parameter sweep
    #[arg(long, default_value = "bench_config.json")]
    pub config: PathBuf,

    /// Only run this strategy
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyKind>,

    /// Only use this lock flavour for the region strategies
    #[arg(long, value_enum)]
    pub region_lock: Option<RegionLock>,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub producers: Option<usize>,

    #[arg(long)]
    pub partitions: Option<usize>,

    #[arg(long)]
    pub entries_per_batch: Option<usize>,

    /// Batches spread across all producers in one run
    #[arg(long)]
    pub total_batches: Option<usize>,

    /// Inbox capacity of the processor strategies
    #[arg(long)]
    pub inbox_capacity: Option<usize>,

    /// Measured iterations per parameter combination
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Write the reports as JSON to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
}
