//! Path Resolution
//!
//! Splits a request path into lookup key and trailing suffix, consults the
//! name store, and produces a [`Resolution`]. The reserved `/list` path is
//! routed to the listing before any lookup happens, which means a stored
//! entry literally named `list` cannot be reached at its bare path. That
//! tension is inherited from the service's contract and left as is.

use crate::store::{NameStore, NamedUrl, StoreResult};
use std::sync::Arc;
use tracing::warn;

/// The reserved path that renders the listing page.
pub const LIST_PATH: &str = "/list";

/// A request path split into its lookup key and trailing suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPath<'a> {
    /// First path segment, leading `/` stripped.
    pub key: &'a str,
    /// Everything after the key, leading `/` included. Empty when the path
    /// had no further segments.
    pub suffix: &'a str,
}

/// The serving decision for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Redirect to this target (resolved URL plus any forwarded suffix)
    Redirect(String),
    /// Render the listing page
    Listing,
    /// No entry matched the lookup key
    NotFound,
}

/// Splits `path` into lookup key and suffix.
///
/// The leading `/` is stripped before splitting, so stored names never
/// carry one. The suffix keeps its leading `/`.
///
/// # Example
///
/// ```
/// use namelink::resolver::split_path;
///
/// let parts = split_path("/yt/watch/abc");
/// assert_eq!(parts.key, "yt");
/// assert_eq!(parts.suffix, "/watch/abc");
/// ```
pub fn split_path(path: &str) -> ResolvedPath<'_> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.find('/') {
        Some(pos) => ResolvedPath {
            key: &trimmed[..pos],
            suffix: &trimmed[pos..],
        },
        None => ResolvedPath {
            key: trimmed,
            suffix: "",
        },
    }
}

/// Resolves request paths against a shared name store.
#[derive(Clone)]
pub struct Resolver {
    /// The name store, shared read-only across all connections
    store: Arc<dyn NameStore>,
}

impl Resolver {
    /// Creates a new resolver over the given store.
    pub fn new(store: Arc<dyn NameStore>) -> Self {
        Self { store }
    }

    /// Decides how to serve `path`.
    ///
    /// A store lookup failure (possible with a remote backend) degrades to
    /// [`Resolution::NotFound`] after logging; a broken backend must never
    /// take a connection task down with it.
    pub async fn resolve(&self, path: &str) -> Resolution {
        if path == LIST_PATH {
            return Resolution::Listing;
        }

        let parts = split_path(path);
        if parts.key.is_empty() {
            return Resolution::NotFound;
        }

        match self.store.resolve(parts.key).await {
            Ok(Some(mut target)) => {
                target.push_str(parts.suffix);
                Resolution::Redirect(target)
            }
            Ok(None) => Resolution::NotFound,
            Err(e) => {
                warn!(key = parts.key, error = %e, "store lookup failed");
                Resolution::NotFound
            }
        }
    }

    /// Enumerates every stored pair, for the listing page.
    pub async fn entries(&self) -> StoreResult<Vec<NamedUrl>> {
        self.store.entries().await
    }
}
