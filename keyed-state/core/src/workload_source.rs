// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::UpdateBatch;

/// A lazy, finite, single-pass sequence of batches owned by one producer.
pub trait WorkloadSource: Send + 'static {
    /// Returns the next batch, or `None` once the sequence is exhausted.
    fn next_batch(&mut self) -> Option<UpdateBatch>;
}

impl<I> WorkloadSource for I
where
    I: Iterator<Item = UpdateBatch> + Send + 'static,
{
    fn next_batch(&mut self) -> Option<UpdateBatch> {
        self.next()
    }
}
