// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use keyed_state_core::{CoordinationError, UpdateBatch};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// A bounded inbox drained by one dedicated consumer task.
///
/// The consumer task is the only code that ever touches `S`, so applying a
/// batch needs no further synchronization. Batches are applied in the order
/// they entered the inbox.
pub struct SequentialProcessor<S> {
    label: String,
    inbox: mpsc::Sender<UpdateBatch>,
    consumer: JoinHandle<S>,
}

impl<S: Send + 'static> SequentialProcessor<S> {
    /// Spawns the consumer task, which owns `state` until the processor drains.
    pub fn spawn<F>(label: impl Into<String>, capacity: usize, mut state: S, mut apply: F) -> Self
    where
        F: FnMut(&mut S, UpdateBatch) + Send + 'static,
    {
        let label = label.into();
        let (inbox, mut rx) = mpsc::channel::<UpdateBatch>(capacity);

        let consumer_label = label.clone();
        let consumer = tokio::spawn(async move {
            let mut applied = 0usize;
            while let Some(batch) = rx.recv().await {
                apply(&mut state, batch);
                applied += 1;
            }
            debug!(processor = %consumer_label, applied, "inbox closed, processor stopped");
            state
        });

        Self {
            label,
            inbox,
            consumer,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Queues the batch, suspending while the inbox is full.
    pub async fn submit(&self, batch: UpdateBatch) -> Result<(), CoordinationError> {
        self.inbox
            .send(batch)
            .await
            .map_err(|_| CoordinationError::ProcessorStopped(self.label.clone()))
    }

    /// Closes the inbox and waits until every queued batch has been applied.
    pub async fn drain(self) -> Result<S, CoordinationError> {
        let Self {
            label,
            inbox,
            consumer,
        } = self;
        drop(inbox);

        consumer
            .await
            .map_err(|e| CoordinationError::ProcessorStopped(format!("{}: {}", label, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_batches_are_applied_in_arrival_order() {
        let processor = SequentialProcessor::spawn("log", 1, Vec::new(), |log: &mut Vec<i32>, batch| {
            log.extend(batch.entries().iter().map(|(_, v)| *v));
        });

        for value in 0..10 {
            processor
                .submit(UpdateBatch::new("A", vec![("k".to_string(), value)]))
                .await
                .unwrap();
        }

        let log = processor.drain().await.unwrap();
        assert_eq!(log, (0..10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_drain_without_batches_returns_initial_state() {
        let processor = SequentialProcessor::spawn("idle", 4, 7usize, |count: &mut usize, _| {
            *count += 1;
        });

        assert_eq!(processor.label(), "idle");
        assert_eq!(processor.drain().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_panicking_consumer_is_reported() {
        let processor = SequentialProcessor::spawn("broken", 4, (), |_: &mut (), _| {
            panic!("consumer failure");
        });

        let _ = processor
            .submit(UpdateBatch::new("A", vec![("k".to_string(), 1)]))
            .await;

        assert!(matches!(
            processor.drain().await,
            Err(CoordinationError::ProcessorStopped(_))
        ));
    }
}
