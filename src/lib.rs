//! # namelink - A Tiny Named-URL Redirect Server
//!
//! namelink maps short names to long URLs and serves the mapping over raw
//! HTTP on a TCP socket. `GET /yt` answers with a `308 Permanent Redirect`
//! to wherever `yt` points, trailing path segments are forwarded onto the
//! destination, `GET /list` renders every registered pair, and anything
//! else gets a fixed 404 page.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                            namelink                                │
//! │                                                                    │
//! │  ┌─────────────┐    ┌──────────────┐    ┌──────────────┐           │
//! │  │ TCP Server  │───>│  Connection  │───>│   Request    │           │
//! │  │ (Listener)  │    │   Handler    │    │   Parser     │           │
//! │  └─────────────┘    └──────────────┘    └──────┬───────┘           │
//! │                                                │                   │
//! │                                                ▼                   │
//! │  ┌─────────────┐    ┌──────────────┐    ┌──────────────┐           │
//! │  │  Response   │<───│   Resolver   │───>│  NameStore   │           │
//! │  │  Builder    │    │ (key+suffix) │    │ (trait seam) │           │
//! │  └─────────────┘    └──────────────┘    └──────────────┘           │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use namelink::connection::{handle_connection, ServerStats};
//! use namelink::resolver::Resolver;
//! use namelink::store::{MemoryStore, NamedUrl};
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut store = MemoryStore::with_capacity(16);
//!     store.insert(NamedUrl::new("yt", "https://youtube.com")).unwrap();
//!
//!     let resolver = Resolver::new(Arc::new(store));
//!     let stats = Arc::new(ServerStats::new());
//!
//!     let listener = TcpListener::bind("0.0.0.0:8000").await.unwrap();
//!
//!     loop {
//!         let (stream, addr) = listener.accept().await.unwrap();
//!         tokio::spawn(handle_connection(
//!             stream,
//!             addr,
//!             resolver.clone(),
//!             Arc::clone(&stats),
//!         ));
//!     }
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`http`]: request-line parsing and response synthesis
//! - [`store`]: the [`store::NameStore`] trait and the bounded in-memory backend
//! - [`resolver`]: key/suffix splitting and store lookup
//! - [`connection`]: per-connection pipeline and server counters
//!
//! ## Design Highlights
//!
//! ### One Response Per Connection
//!
//! There is no keep-alive and no request loop. A connection is read once,
//! answered at most once, and shut down. That keeps the whole pipeline a
//! straight line and makes slow-client behavior trivially bounded.
//!
//! ### Exact Buffer Sizing
//!
//! Response buffers are sized from the actual lengths of the names and
//! URLs involved, never from an assumed per-entry byte budget. An entry
//! too big for somebody's estimate simply cannot be truncated.
//!
//! ### Read-Only Serving
//!
//! The name store is seeded at startup and never mutated while serving,
//! so connection tasks share it through a plain `Arc` with no locking.
//! Registration of new names is deliberately not part of the serving
//! surface.

pub mod connection;
pub mod http;
pub mod resolver;
pub mod store;

// Re-export commonly used types for convenience
pub use connection::{handle_connection, ConnectionError, ConnectionHandler, ServerStats};
pub use http::{parse_request_path, ParseError};
pub use resolver::{Resolution, Resolver};
pub use store::{MemoryStore, NameStore, NamedUrl};

/// The default port namelink listens on
pub const DEFAULT_PORT: u16 = 8000;

/// The default host namelink binds to (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// The default listen backlog
pub const DEFAULT_BACKLOG: u32 = 32;

/// Version of namelink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
