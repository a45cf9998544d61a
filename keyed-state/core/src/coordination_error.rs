// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::PartitionKey;
use thiserror::Error;

/// Failures of the coordination protocol.
///
/// None of these are recoverable: each one aborts the run it happened in.
/// Backpressure on a full inbox or a held region is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinationError {
    /// A batch targeted a partition outside the enumerated set
    #[error("partition '{0}' is not part of the enumerated partition set")]
    UnknownPartition(PartitionKey),

    /// Draining was requested while producers still hold the strategy
    #[error("drain requested while {0} producer handle(s) are still active")]
    ProducersStillActive(usize),

    /// A sequential processor's consumer task is gone
    #[error("sequential processor '{0}' stopped before draining")]
    ProcessorStopped(String),

    /// A blocking exclusive region was poisoned by a panicking holder
    #[error("exclusive region poisoned")]
    RegionPoisoned,

    /// A producer task panicked or was aborted
    #[error("producer {producer} failed: {reason}")]
    ProducerFailed { producer: usize, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
