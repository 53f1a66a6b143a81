//! Bounded In-Process Name Store
//!
//! An ordered list of name/URL pairs with capacity fixed at construction.
//! All inserts happen during startup seeding, before the store is wrapped in
//! an `Arc` and shared with connection tasks; after that it is read-only, so
//! lookups need no locking at all.
//!
//! Lookup is a linear scan, first exact match wins. With names being unique
//! there is at most one candidate, and the entry counts this server is built
//! for make a scan cheaper than any indexing.

use crate::store::{NameStore, NamedUrl, StoreError, StoreResult};
use async_trait::async_trait;

/// Default number of entries a store is sized for.
pub const DEFAULT_CAPACITY: usize = 16;

/// A bounded, insertion-ordered collection of [`NamedUrl`] entries.
#[derive(Debug)]
pub struct MemoryStore {
    entries: Vec<NamedUrl>,
    capacity: usize,
}

impl MemoryStore {
    /// Creates an empty store that will hold at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry.
    ///
    /// Fails with [`StoreError::CapacityExhausted`] when the store is full.
    /// Duplicate names are NOT rejected here; name uniqueness is an
    /// invariant the seeding caller upholds.
    pub fn insert(&mut self, entry: NamedUrl) -> StoreResult<()> {
        if self.entries.len() >= self.capacity {
            return Err(StoreError::CapacityExhausted {
                capacity: self.capacity,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no entries have been seeded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Linear scan for the first entry whose name matches exactly.
    fn lookup(&self, name: &str) -> Option<&NamedUrl> {
        self.entries.iter().find(|e| e.name == name)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl NameStore for MemoryStore {
    async fn resolve(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(self.lookup(name).map(|e| e.url.clone()))
    }

    async fn entries(&self) -> StoreResult<Vec<NamedUrl>> {
        Ok(self.entries.clone())
    }
}
