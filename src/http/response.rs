//! HTTP Response Synthesis
//!
//! This module builds the three response shapes namelink can send. Each
//! builder computes the exact byte length of its output from the actual
//! input lengths before allocating, so an oversized name or URL can never
//! be truncated to fit an assumed per-entry budget.
//!
//! Allocation goes through `try_reserve_exact`, so running out of memory
//! while building a response surfaces as an error value the connection
//! handler can react to instead of taking the process down.
//!
//! ## Response Shapes
//!
//! ```text
//! Redirect:   HTTP/1.1 308 Permanent Redirect
//!             Cache-Control: no-store
//!             Content-Length: 0
//!             Location: <url>
//!
//! Listing:    HTTP/1.1 200 OK
//!             Cache-Control: no-store
//!             Content-Type: text/html
//!             Content-Length: <n>
//!
//!             <li><a href='<url>'><name></a></li>...
//!
//! Not found:  HTTP/1.1 404 Not Found
//!             Content-Type: text/html
//!             Connection: close
//!             Content-Length: 79
//!
//!             <h1> Not Found </h1><pre>...</pre>
//! ```
//!
//! Header order is part of the contract and covered by tests.

use crate::store::NamedUrl;
use std::collections::TryReserveError;
use std::sync::OnceLock;
use thiserror::Error;

/// The fixed body of the not-found page. Exactly 79 bytes.
pub const NOT_FOUND_BODY: &str =
    "<h1> Not Found </h1><pre>There is no registry for the name your provided.</pre>";

const REDIRECT_HEAD: &str =
    "HTTP/1.1 308 Permanent Redirect\r\nCache-Control: no-store\r\nContent-Length: 0\r\nLocation: ";
const REDIRECT_TAIL: &str = "\r\n\r\n";

// Per-entry markup fragments for the listing body.
const ENTRY_OPEN: &str = "<li><a href='";
const ENTRY_MID: &str = "'>";
const ENTRY_CLOSE: &str = "</a></li>";

/// Errors that can occur while building a response.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Reserving the response buffer failed (resource exhaustion)
    #[error("response allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}

/// Result type for response building.
pub type ResponseResult = Result<Vec<u8>, ResponseError>;

/// Builds a 308 redirect response pointing at `url`.
///
/// The buffer is sized to the status line, the fixed headers, and the
/// actual URL length. The body is empty (`Content-Length: 0`).
pub fn redirect(url: &str) -> ResponseResult {
    let total = REDIRECT_HEAD.len() + url.len() + REDIRECT_TAIL.len();

    let mut buf = Vec::new();
    buf.try_reserve_exact(total)?;
    buf.extend_from_slice(REDIRECT_HEAD.as_bytes());
    buf.extend_from_slice(url.as_bytes());
    buf.extend_from_slice(REDIRECT_TAIL.as_bytes());

    Ok(buf)
}

/// Builds a 200 listing response with one `<li>` per entry.
///
/// Entries appear in the order given, which is the store's iteration
/// order. `Content-Length` is the exact byte length of the generated
/// body; the body length is summed from the real name and URL lengths
/// plus the literal markup fragments, never an assumed per-entry budget.
pub fn listing(entries: &[NamedUrl]) -> ResponseResult {
    let body_len: usize = entries
        .iter()
        .map(|e| {
            ENTRY_OPEN.len() + e.url.len() + ENTRY_MID.len() + e.name.len() + ENTRY_CLOSE.len()
        })
        .sum();

    let head = format!(
        "HTTP/1.1 200 OK\r\nCache-Control: no-store\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n",
        body_len
    );

    let mut buf = Vec::new();
    buf.try_reserve_exact(head.len() + body_len)?;
    buf.extend_from_slice(head.as_bytes());
    for entry in entries {
        buf.extend_from_slice(ENTRY_OPEN.as_bytes());
        buf.extend_from_slice(entry.url.as_bytes());
        buf.extend_from_slice(ENTRY_MID.as_bytes());
        buf.extend_from_slice(entry.name.as_bytes());
        buf.extend_from_slice(ENTRY_CLOSE.as_bytes());
    }
    debug_assert_eq!(buf.len(), head.len() + body_len);

    Ok(buf)
}

/// Returns the fixed 404 response.
///
/// The response is assembled once and cached for the process lifetime;
/// its `Content-Length` is derived from [`NOT_FOUND_BODY`], not written
/// out by hand.
pub fn not_found() -> &'static [u8] {
    static RESPONSE: OnceLock<Vec<u8>> = OnceLock::new();
    RESPONSE.get_or_init(|| {
        format!(
            "HTTP/1.1 404 Not Found\r\nContent-Type: text/html\r\nConnection: close\r\nContent-Length: {}\r\n\r\n{}",
            NOT_FOUND_BODY.len(),
            NOT_FOUND_BODY
        )
        .into_bytes()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_value<'a>(response: &'a str, name: &str) -> Option<&'a str> {
        response
            .split("\r\n")
            .find_map(|line| line.strip_prefix(&format!("{}: ", name)))
    }

    fn body_of(response: &[u8]) -> &[u8] {
        let pos = response
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("response has no header terminator");
        &response[pos + 4..]
    }

    #[test]
    fn test_redirect_exact_bytes() {
        let response = redirect("https://youtube.com").unwrap();
        assert_eq!(
            response,
            b"HTTP/1.1 308 Permanent Redirect\r\n\
              Cache-Control: no-store\r\n\
              Content-Length: 0\r\n\
              Location: https://youtube.com\r\n\
              \r\n"
                .to_vec()
        );
    }

    #[test]
    fn test_redirect_carries_suffix_untouched() {
        let response = redirect("https://youtube.com/watch?v=abc").unwrap();
        let text = String::from_utf8(response).unwrap();
        assert_eq!(
            header_value(&text, "Location"),
            Some("https://youtube.com/watch?v=abc")
        );
    }

    #[test]
    fn test_not_found_body_is_79_bytes() {
        assert_eq!(NOT_FOUND_BODY.len(), 79);
    }

    #[test]
    fn test_not_found_exact_bytes() {
        let response = not_found();
        let expected = b"HTTP/1.1 404 Not Found\r\n\
              Content-Type: text/html\r\n\
              Connection: close\r\n\
              Content-Length: 79\r\n\
              \r\n\
              <h1> Not Found </h1><pre>There is no registry for the name your provided.</pre>";
        assert_eq!(response, expected.as_slice());
    }

    #[test]
    fn test_not_found_is_stable() {
        assert_eq!(not_found(), not_found());
    }

    #[test]
    fn test_listing_empty_store() {
        let response = listing(&[]).unwrap();
        let text = String::from_utf8(response.clone()).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert_eq!(header_value(&text, "Content-Length"), Some("0"));
        assert!(body_of(&response).is_empty());
    }

    #[test]
    fn test_listing_entries_in_order() {
        let entries = vec![
            NamedUrl::new("yt", "https://youtube.com"),
            NamedUrl::new("gm", "https://gmail.com"),
        ];
        let response = listing(&entries).unwrap();
        let body = String::from_utf8(body_of(&response).to_vec()).unwrap();
        assert_eq!(
            body,
            "<li><a href='https://youtube.com'>yt</a></li>\
             <li><a href='https://gmail.com'>gm</a></li>"
        );
    }

    #[test]
    fn test_listing_content_length_matches_body() {
        let entries = vec![
            NamedUrl::new("yt", "https://youtube.com"),
            NamedUrl::new("gm", "https://gmail.com"),
        ];
        let response = listing(&entries).unwrap();
        let text = String::from_utf8(response.clone()).unwrap();
        let declared: usize = header_value(&text, "Content-Length").unwrap().parse().unwrap();
        assert_eq!(declared, body_of(&response).len());
    }

    #[test]
    fn test_listing_header_order() {
        let response = listing(&[NamedUrl::new("yt", "https://youtube.com")]).unwrap();
        let text = String::from_utf8(response).unwrap();
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines[0], "HTTP/1.1 200 OK");
        assert_eq!(lines[1], "Cache-Control: no-store");
        assert_eq!(lines[2], "Content-Type: text/html");
        assert!(lines[3].starts_with("Content-Length: "));
    }

    #[test]
    fn test_listing_oversized_entry_not_truncated() {
        // A single entry hundreds of bytes long must come through whole,
        // with Content-Length still exact.
        let url = format!("https://example.com/{}", "x".repeat(300));
        let entries = vec![NamedUrl::new("big", url.as_str())];
        let response = listing(&entries).unwrap();
        let text = String::from_utf8(response.clone()).unwrap();
        let declared: usize = header_value(&text, "Content-Length").unwrap().parse().unwrap();
        let body = body_of(&response);
        assert_eq!(declared, body.len());
        assert!(String::from_utf8(body.to_vec()).unwrap().contains(&url));
    }
}
