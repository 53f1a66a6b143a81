//! Path Resolver Module
//!
//! This module turns a parsed request path into a serving decision: redirect
//! somewhere, render the listing, or report not-found.
//!
//! ## Architecture
//!
//! ```text
//! Request path
//!       │
//!       ▼
//! ┌─────────────────┐
//! │    Resolver     │  (this module)
//! │                 │
//! │  - /list route  │
//! │  - split path   │
//! │  - store lookup │
//! │  - join suffix  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    NameStore    │  (store module)
//! └─────────────────┘
//! ```
//!
//! ## Resolution Policy
//!
//! The path's first segment is the lookup key; everything after it is the
//! suffix and gets appended verbatim onto the resolved URL. `/yt/watch`
//! with `yt -> https://youtube.com` redirects to
//! `https://youtube.com/watch`. The bare name with no suffix is the plain
//! exact-match case of the same rule.

pub mod handler;

// Re-export the resolver and its outcome type
pub use handler::{split_path, Resolution, ResolvedPath, Resolver, LIST_PATH};
