// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CoordinationError, PartitionKey};
use std::collections::HashSet;
use std::sync::Arc;

/// The pre-enumerated set of partitions known before any producer starts.
///
/// Cloning is cheap, every strategy keeps a copy to validate ingress.
#[derive(Clone, Debug)]
pub struct PartitionSet {
    ordered: Arc<[PartitionKey]>,
    lookup: Arc<HashSet<PartitionKey>>,
}

impl PartitionSet {
    /// Builds the set, dropping duplicate keys while keeping first-seen order.
    pub fn new(keys: impl IntoIterator<Item = PartitionKey>) -> Self {
        let mut lookup = HashSet::new();
        let mut ordered = Vec::new();
        for key in keys {
            if lookup.insert(key.clone()) {
                ordered.push(key);
            }
        }

        Self {
            ordered: ordered.into(),
            lookup: Arc::new(lookup),
        }
    }

    pub fn contains(&self, key: &PartitionKey) -> bool {
        self.lookup.contains(key)
    }

    /// Fails fast for a partition outside the enumerated set.
    pub fn ensure_known(&self, key: &PartitionKey) -> Result<(), CoordinationError> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(CoordinationError::UnknownPartition(key.clone()))
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PartitionKey> {
        self.ordered.iter()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl FromIterator<PartitionKey> for PartitionSet {
    fn from_iter<I: IntoIterator<Item = PartitionKey>>(iter: I) -> Self {
        Self::new(iter)
    }
}
