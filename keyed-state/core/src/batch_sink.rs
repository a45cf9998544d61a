// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CoordinationError, UpdateBatch};
use async_trait::async_trait;

/// Ingress side of a coordination strategy, as seen by producers.
#[async_trait]
pub trait BatchSink: Send + Sync + 'static {
    /// Hands a batch over for application.
    ///
    /// May suspend until the sink has capacity. Once this returns `Ok` the
    /// batch will be reflected in the final state exactly once.
    async fn submit(&self, batch: UpdateBatch) -> Result<(), CoordinationError>;
}
