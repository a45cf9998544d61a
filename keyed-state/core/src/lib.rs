// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod partition_key;
pub use partition_key::PartitionKey;

mod update_batch;
pub use update_batch::UpdateBatch;

mod partition_set;
pub use partition_set::PartitionSet;

mod partition_store;
pub use partition_store::{apply_entries, PartitionState, PartitionStore};

mod coordination_error;
pub use coordination_error::CoordinationError;

mod batch_sink;
pub use batch_sink::BatchSink;

pub mod workload_source;
pub use workload_source::WorkloadSource;

pub mod workload;
pub use workload::{Workload, WorkloadConfig, DEFAULT_TOTAL_BATCHES};

pub mod utils;
