//! Name Store Module
//!
//! This module provides the mapping from short names to long URLs that the
//! resolver consults. The mapping sits behind the [`NameStore`] trait so the
//! serving pipeline stays agnostic to where the pairs actually live.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  Resolver                           │
//! └──────────────────────┬──────────────────────────────┘
//!                        │ Arc<dyn NameStore>
//!                        ▼
//!        ┌───────────────────────────────┐
//!        │          NameStore            │
//!        │  resolve(name) -> Option<url> │
//!        │  entries() -> Vec<NamedUrl>   │
//!        └───────────────┬───────────────┘
//!                        │
//!              ┌─────────┴──────────┐
//!              ▼                    ▼
//!        ┌───────────┐      ┌──────────────┐
//!        │MemoryStore│      │ remote KV    │
//!        │ (shipped) │      │ (pluggable)  │
//!        └───────────┘      └──────────────┘
//! ```
//!
//! The shipped backend is [`MemoryStore`], a bounded ordered list seeded at
//! startup. A remote key-value backend implements the same two operations
//! (a point lookup by name and a full enumeration, hash-field get and
//! hash-field enumerate in key-value terms) behind the same trait.
//!
//! ## Key Normalization
//!
//! Names are stored WITHOUT a leading `/`. The resolver strips the request
//! path's leading separator before looking a key up, so the two sides always
//! agree.
//!
//! ## Example
//!
//! ```
//! use namelink::store::{MemoryStore, NamedUrl, NameStore};
//!
//! # tokio_test::block_on(async {
//! let mut store = MemoryStore::with_capacity(16);
//! store.insert(NamedUrl::new("yt", "https://youtube.com")).unwrap();
//!
//! let url = store.resolve("yt").await.unwrap();
//! assert_eq!(url.as_deref(), Some("https://youtube.com"));
//! # });
//! ```

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::{MemoryStore, DEFAULT_CAPACITY};

/// A named URL: a short lookup name paired with its redirect destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedUrl {
    /// Short identifier used as the lookup key, stored without a leading `/`.
    /// Unique among all entries; uniqueness is upheld by whoever seeds the
    /// store, not enforced on insertion.
    pub name: String,
    /// The absolute destination URL.
    pub url: String,
}

impl NamedUrl {
    /// Creates a new named URL pair.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Errors that can occur in a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The bounded in-process store is full
    #[error("store capacity exhausted ({capacity} entries)")]
    CapacityExhausted { capacity: usize },

    /// A remote backend failed (connection lost, protocol error, ...)
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The lookup interface the serving pipeline depends on.
///
/// Implementations are shared read-only across connection tasks via
/// `Arc<dyn NameStore>`; no runtime mutation happens through this trait.
/// Lookups are case-sensitive exact matches on the stored name.
#[async_trait]
pub trait NameStore: Send + Sync {
    /// Point lookup: returns the URL registered under `name`, if any.
    async fn resolve(&self, name: &str) -> StoreResult<Option<String>>;

    /// Full enumeration of every pair, in the store's iteration order.
    async fn entries(&self) -> StoreResult<Vec<NamedUrl>>;
}
