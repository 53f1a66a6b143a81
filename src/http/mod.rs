//! Minimal HTTP Wire Protocol
//!
//! This module implements the small HTTP/1.x subset namelink speaks:
//! parsing the request line of an incoming GET and synthesizing the three
//! fixed response shapes the server can send.
//!
//! ## Overview
//!
//! Only the request line is ever inspected. Headers and body, if a client
//! sends any, are ignored. On the way out the server produces exactly one of:
//!
//! - a `308 Permanent Redirect` pointing at the resolved long URL
//! - a `200 OK` HTML listing of every registered name
//! - a fixed `404 Not Found` page
//!
//! ## Modules
//!
//! - `parser`: bounded request-line parser
//! - `response`: response synthesis with exact buffer sizing
//!
//! ## Example
//!
//! ```ignore
//! use namelink::http::{parse_request_path, response};
//!
//! let path = parse_request_path(b"GET /yt HTTP/1.1\r\n\r\n")?;
//! assert_eq!(path, "/yt");
//!
//! let bytes = response::redirect("https://youtube.com")?;
//! ```

pub mod parser;
pub mod response;

// Re-export commonly used items for convenience
pub use parser::{parse_request_path, ParseError, MAX_PATH_BYTES, MAX_REQUEST_BYTES};
pub use response::ResponseError;
