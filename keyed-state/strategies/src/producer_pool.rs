// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use keyed_state_core::{BatchSink, CoordinationError, WorkloadSource};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Totals gathered once every producer has terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducerReport {
    pub producers: usize,
    pub batches_submitted: usize,
}

/// One task per workload source, each feeding its batches into a shared sink.
///
/// The first producer to hit an error or panic cancels the pool's token; the
/// others notice before their next batch and stop, so the run ends early.
pub struct ProducerPool {
    handles: Vec<JoinHandle<Result<usize, CoordinationError>>>,
    abort: CancellationToken,
}

impl ProducerPool {
    pub fn spawn<K, S>(sink: Arc<K>, sources: Vec<S>) -> Self
    where
        K: BatchSink,
        S: WorkloadSource,
    {
        let abort = CancellationToken::new();
        let handles = sources
            .into_iter()
            .enumerate()
            .map(|(producer, source)| {
                let sink = sink.clone();
                let abort = abort.clone();
                tokio::spawn(produce(producer, source, sink, abort))
            })
            .collect();

        Self { handles, abort }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Returns a clone of the token cancelled when the run is aborted.
    pub fn abort_token(&self) -> CancellationToken {
        self.abort.clone()
    }

    /// Waits for every producer to terminate.
    ///
    /// Once this returns, no producer holds the sink any more. The first
    /// failure wins; later producers are still joined before it is reported.
    pub async fn await_all_producers(self) -> Result<ProducerReport, CoordinationError> {
        let producers = self.handles.len();
        let mut batches_submitted = 0;
        let mut first_error = None;

        for (producer, handle) in self.handles.into_iter().enumerate() {
            match handle.await {
                Ok(Ok(submitted)) => batches_submitted += submitted,
                Ok(Err(e)) => {
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    self.abort.cancel();
                    warn!(producer, error = %e, "producer task failed");
                    first_error.get_or_insert(CoordinationError::ProducerFailed {
                        producer,
                        reason: e.to_string(),
                    });
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(ProducerReport {
                producers,
                batches_submitted,
            }),
        }
    }
}

async fn produce<K, S>(
    producer: usize,
    mut source: S,
    sink: Arc<K>,
    abort: CancellationToken,
) -> Result<usize, CoordinationError>
where
    K: BatchSink,
    S: WorkloadSource,
{
    // Cancels the run on every exit that does not disarm it, panics included.
    let abort_on_exit = abort.clone().drop_guard();
    let mut submitted = 0;

    while let Some(batch) = source.next_batch() {
        if abort.is_cancelled() {
            debug!(producer, submitted, "producer stopped, run aborted");
            abort_on_exit.disarm();
            return Ok(submitted);
        }

        if let Err(e) = sink.submit(batch).await {
            warn!(producer, error = %e, "producer aborting run");
            return Err(e);
        }
        submitted += 1;
    }

    debug!(producer, submitted, "producer finished");
    abort_on_exit.disarm();
    Ok(submitted)
}
