// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::RegionLock;
use keyed_state_core::CoordinationError;

/// Mutual exclusion around a piece of state, in one of two lock flavours.
///
/// The closure passed to [`ExclusiveRegion::with`] runs entirely while the
/// lock is held and never awaits, so the guard is released on every exit path.
pub enum ExclusiveRegion<T> {
    Blocking(std::sync::Mutex<T>),
    Async(tokio::sync::Mutex<T>),
}

impl<T: Send> ExclusiveRegion<T> {
    pub fn new(lock: RegionLock, state: T) -> Self {
        match lock {
            RegionLock::Blocking => ExclusiveRegion::Blocking(std::sync::Mutex::new(state)),
            RegionLock::Async => ExclusiveRegion::Async(tokio::sync::Mutex::new(state)),
        }
    }

    pub fn lock_kind(&self) -> RegionLock {
        match self {
            ExclusiveRegion::Blocking(_) => RegionLock::Blocking,
            ExclusiveRegion::Async(_) => RegionLock::Async,
        }
    }

    /// Acquires the region, runs `f` on the guarded state and releases it.
    pub async fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, CoordinationError> {
        match self {
            ExclusiveRegion::Blocking(mutex) => {
                let mut guard = mutex
                    .lock()
                    .map_err(|_| CoordinationError::RegionPoisoned)?;
                Ok(f(&mut guard))
            }
            ExclusiveRegion::Async(mutex) => {
                let mut guard = mutex.lock().await;
                Ok(f(&mut guard))
            }
        }
    }

    pub fn into_inner(self) -> Result<T, CoordinationError> {
        match self {
            ExclusiveRegion::Blocking(mutex) => mutex
                .into_inner()
                .map_err(|_| CoordinationError::RegionPoisoned),
            ExclusiveRegion::Async(mutex) => Ok(mutex.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_region_serializes_read_modify_write() {
        for lock in RegionLock::ALL {
            let region = Arc::new(ExclusiveRegion::new(lock, 0u64));
            assert_eq!(region.lock_kind(), lock);

            let mut handles = Vec::new();
            for _ in 0..8 {
                let region = region.clone();
                handles.push(tokio::spawn(async move {
                    for _ in 0..1_000 {
                        region
                            .with(|count| {
                                let read = *count;
                                *count = read + 1;
                            })
                            .await
                            .unwrap();
                    }
                }));
            }
            for handle in handles {
                handle.await.unwrap();
            }

            let region = Arc::try_unwrap(region).ok().unwrap();
            assert_eq!(region.into_inner().unwrap(), 8_000);
        }
    }

    #[test]
    fn test_poisoned_blocking_region_is_reported() {
        let region = Arc::new(ExclusiveRegion::new(RegionLock::Blocking, 0u32));

        let poisoner = region.clone();
        let _ = std::thread::spawn(move || {
            if let ExclusiveRegion::Blocking(mutex) = poisoner.as_ref() {
                let _guard = mutex.lock().unwrap();
                panic!("poison the region");
            }
        })
        .join();

        let region = Arc::try_unwrap(region).ok().unwrap();
        assert_eq!(region.into_inner(), Err(CoordinationError::RegionPoisoned));
    }
}
