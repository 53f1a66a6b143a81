//! Connection Handling Module
//!
//! One accepted connection flows through this module exactly once:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TCP Listener                            │
//! │                      (main.rs)                              │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │ accept()
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  ConnectionHandler                          │
//! │                                                             │
//! │  ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐ │
//! │  │ one read │──>│  parse   │──>│ resolve  │──>│  build + │ │
//! │  │ (bounded)│   │   path   │   │          │   │  write   │ │
//! │  └──────────┘   └──────────┘   └──────────┘   └──────────┘ │
//! │                                                      │      │
//! │                                                      ▼      │
//! │                                                   close     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no retry and no keep-alive: every connection gets at most one
//! response and is then shut down. A request that fails to parse is closed
//! without writing anything at all.

pub mod handler;

// Re-export commonly used types
pub use handler::{handle_connection, ConnectionError, ConnectionHandler, ServerStats};
