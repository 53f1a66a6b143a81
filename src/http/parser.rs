//! Bounded HTTP Request-Line Parser
//!
//! This module extracts the request path from the first bytes read off a
//! connection. The match is anchored at offset zero: the buffer must begin
//! with `GET `, followed by the path token, a single space, and `HTTP/`.
//! Nothing after `HTTP/` is inspected.
//!
//! ## Design Philosophy
//!
//! 1. **One read, one parse**: the connection handler performs a single
//!    bounded read and hands the bytes here. A client that dribbles its
//!    request across multiple packets gets a parse failure, not a hang.
//! 2. **Reject, never truncate**: a path longer than [`MAX_PATH_BYTES`] is
//!    refused outright. Truncating would silently redirect to the wrong
//!    target.
//! 3. **Verbatim extraction**: the returned path is exactly the token from
//!    the request line, leading `/` included. No percent-decoding, no
//!    query-string handling.

use thiserror::Error;

/// Maximum number of bytes read from a connection in the single read attempt.
/// Anything past this is never requested from the socket.
pub const MAX_REQUEST_BYTES: usize = 1024;

/// Maximum length of the request path token. Longer paths are rejected.
pub const MAX_PATH_BYTES: usize = 256;

/// Errors that can occur while extracting the request path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The read returned no bytes (peer closed or never sent anything)
    #[error("connection yielded no request bytes")]
    EmptyRead,

    /// The buffer does not match `GET <path> HTTP/` anchored at offset zero
    #[error("request line does not match `GET <path> HTTP/`")]
    Malformed,

    /// The path token exceeds the maximum allowed length
    #[error("request path too long: {len} bytes (max: {max})")]
    PathTooLong { len: usize, max: usize },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Extracts the request path from the raw bytes of an HTTP request.
///
/// The buffer must start with `GET ` (no leading-whitespace tolerance),
/// the path must start with `/`, and the token after the path must start
/// with `HTTP/`. The path is returned verbatim.
///
/// # Returns
///
/// - `Ok(path)` - the path token, leading `/` included
/// - `Err(ParseError::EmptyRead)` - the buffer is empty
/// - `Err(ParseError::Malformed)` - the request line doesn't match
/// - `Err(ParseError::PathTooLong { .. })` - path exceeds [`MAX_PATH_BYTES`]
///
/// # Example
///
/// ```
/// use namelink::http::parse_request_path;
///
/// let path = parse_request_path(b"GET /yt/watch HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();
/// assert_eq!(path, "/yt/watch");
/// ```
pub fn parse_request_path(buf: &[u8]) -> ParseResult<&str> {
    if buf.is_empty() {
        return Err(ParseError::EmptyRead);
    }

    let rest = buf.strip_prefix(b"GET ").ok_or(ParseError::Malformed)?;

    // The path token runs to the next space.
    let token_end = match rest.iter().position(|&b| b == b' ') {
        Some(pos) => pos,
        None => {
            // No terminator anywhere in the read. Either the path alone
            // overflowed the read buffer, or the request was cut short.
            if rest.len() > MAX_PATH_BYTES {
                return Err(ParseError::PathTooLong {
                    len: rest.len(),
                    max: MAX_PATH_BYTES,
                });
            }
            return Err(ParseError::Malformed);
        }
    };

    if token_end > MAX_PATH_BYTES {
        return Err(ParseError::PathTooLong {
            len: token_end,
            max: MAX_PATH_BYTES,
        });
    }

    if !rest[token_end + 1..].starts_with(b"HTTP/") {
        return Err(ParseError::Malformed);
    }

    let path = std::str::from_utf8(&rest[..token_end]).map_err(|_| ParseError::Malformed)?;

    if !path.starts_with('/') {
        return Err(ParseError::Malformed);
    }

    Ok(path)
}
