//! Per-Connection Pipeline
//!
//! This module drives one accepted connection from read to close. Unlike a
//! looping protocol server, the lifecycle here is strictly linear: a single
//! bounded read, one parse, one resolution, one write, close. Partial sends
//! from slow clients degrade to a parse failure rather than a hang; that
//! tradeoff is part of the service contract.
//!
//! ## Error Behavior
//!
//! - Parse failure: close silently, zero bytes written
//! - Resolution miss: write the fixed 404, close
//! - Response allocation failure: close without writing
//! - Write failure: log and proceed to close
//!
//! None of these ever escalate past the connection task; the accept loop
//! keeps running regardless of what a single connection does.

use crate::http::parser::{parse_request_path, ParseError, MAX_REQUEST_BYTES};
use crate::http::response::{self, ResponseError};
use crate::resolver::{Resolution, Resolver};
use crate::store::StoreError;
use bytes::BytesMut;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, error, info, warn};

/// Counters shared across every connection of one server instance.
#[derive(Debug, Default)]
pub struct ServerStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Redirect responses served
    pub redirects_served: AtomicU64,
    /// Listing pages served
    pub listings_served: AtomicU64,
    /// Not-found pages served
    pub not_found_served: AtomicU64,
    /// Total bytes written to peers
    pub bytes_written: AtomicU64,
}

impl ServerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn redirect_served(&self) {
        self.redirects_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn listing_served(&self) {
        self.listings_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn not_found_served(&self) {
        self.not_found_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written.fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Errors that can occur while handling a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error on read or write (network issue, peer reset)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request line could not be parsed
    #[error("request parse error: {0}")]
    Parse(#[from] ParseError),

    /// Building the response failed (allocation)
    #[error("response build error: {0}")]
    Response(#[from] ResponseError),

    /// The store backend failed while enumerating entries
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Handles a single connection from accept to close.
pub struct ConnectionHandler {
    /// The TCP stream for this connection
    stream: TcpStream,

    /// Peer address (for logging)
    addr: SocketAddr,

    /// Resolver over the shared name store
    resolver: Resolver,

    /// Server-wide counters (shared)
    stats: Arc<ServerStats>,
}

impl ConnectionHandler {
    /// Creates a new connection handler.
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        resolver: Resolver,
        stats: Arc<ServerStats>,
    ) -> Self {
        stats.connection_opened();

        Self {
            stream,
            addr,
            resolver,
            stats,
        }
    }

    /// Runs the connection to completion.
    ///
    /// Every exit path shuts down the write half before dropping the
    /// stream, mirroring a `shutdown(SHUT_WR)` before close.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        debug!(client = %self.addr, "connection accepted");

        let result = self.serve().await;

        match &result {
            Ok(()) => {}
            Err(ConnectionError::Parse(e)) => {
                debug!(client = %self.addr, error = %e, "request rejected, closing silently")
            }
            Err(ConnectionError::Response(e)) => {
                error!(client = %self.addr, error = %e, "response build failed, closing unanswered")
            }
            Err(ConnectionError::Store(e)) => {
                error!(client = %self.addr, error = %e, "store enumeration failed, closing unanswered")
            }
            Err(ConnectionError::Io(e)) if e.kind() == std::io::ErrorKind::ConnectionReset => {
                debug!(client = %self.addr, "connection reset by peer")
            }
            Err(ConnectionError::Io(e)) => {
                warn!(client = %self.addr, error = %e, "connection I/O failed")
            }
        }

        // Peer may already be gone; a failed shutdown changes nothing.
        let _ = self.stream.shutdown().await;

        result
    }

    /// The read-parse-resolve-write pipeline.
    async fn serve(&mut self) -> Result<(), ConnectionError> {
        let mut buf = BytesMut::with_capacity(MAX_REQUEST_BYTES);

        // One read attempt. Whatever arrived by now is all the request
        // bytes this connection will ever be parsed from.
        self.stream.read_buf(&mut buf).await?;

        let path = parse_request_path(&buf)?;

        let bytes = match self.resolver.resolve(path).await {
            Resolution::Redirect(target) => {
                let bytes = response::redirect(&target)?;
                self.stats.redirect_served();
                info!(client = %self.addr, path, target = %target, "redirect served");
                bytes
            }
            Resolution::Listing => {
                let entries = self.resolver.entries().await?;
                let bytes = response::listing(&entries)?;
                self.stats.listing_served();
                info!(client = %self.addr, entries = entries.len(), "listing served");
                bytes
            }
            Resolution::NotFound => {
                self.stats.not_found_served();
                info!(client = %self.addr, path, "name not found");
                response::not_found().to_vec()
            }
        };

        self.stream.write_all(&bytes).await?;
        self.stats.bytes_written(bytes.len());

        Ok(())
    }
}

/// Handles a client connection.
///
/// Convenience wrapper that builds a [`ConnectionHandler`] and runs it to
/// completion. All errors are already logged inside `run`; nothing
/// propagates to the accept loop.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    resolver: Resolver,
    stats: Arc<ServerStats>,
) {
    let handler = ConnectionHandler::new(stream, addr, resolver, stats);
    let _ = handler.run().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, NamedUrl};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn spawn_test_server() -> (SocketAddr, Arc<ServerStats>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut store = MemoryStore::with_capacity(16);
        store
            .insert(NamedUrl::new("yt", "https://youtube.com"))
            .unwrap();
        store
            .insert(NamedUrl::new("gm", "https://gmail.com"))
            .unwrap();

        let resolver = Resolver::new(Arc::new(store));
        let stats = Arc::new(ServerStats::new());
        let stats_clone = Arc::clone(&stats);

        tokio::spawn(async move {
            while let Ok((stream, peer)) = listener.accept().await {
                let resolver = resolver.clone();
                let stats = Arc::clone(&stats_clone);
                tokio::spawn(handle_connection(stream, peer, resolver, stats));
            }
        });

        (addr, stats)
    }

    async fn send_request(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
        let mut client = TcpStream::connect(addr).await.unwrap();
        client.write_all(raw).await.unwrap();

        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_redirect_for_known_name() {
        let (addr, _) = spawn_test_server().await;

        let response = send_request(addr, b"GET /yt HTTP/1.1\r\n\r\n").await;
        let text = String::from_utf8(response).unwrap();

        assert!(text.starts_with("HTTP/1.1 308 Permanent Redirect\r\n"));
        assert!(text.contains("Location: https://youtube.com\r\n"));
        assert!(text.contains("Content-Length: 0\r\n"));
    }

    #[tokio::test]
    async fn test_redirect_forwards_path_suffix() {
        let (addr, _) = spawn_test_server().await;

        let response = send_request(addr, b"GET /yt/watch/abc123 HTTP/1.1\r\n\r\n").await;
        let text = String::from_utf8(response).unwrap();

        assert!(text.contains("Location: https://youtube.com/watch/abc123\r\n"));
    }

    #[tokio::test]
    async fn test_unknown_name_gets_fixed_404() {
        let (addr, _) = spawn_test_server().await;

        let response = send_request(addr, b"GET /unknown HTTP/1.1\r\n\r\n").await;

        // Byte-exact fixed page, Content-Length 79 included.
        assert_eq!(response, response::not_found());
    }

    #[tokio::test]
    async fn test_listing_contains_every_entry() {
        let (addr, _) = spawn_test_server().await;

        let response = send_request(addr, b"GET /list HTTP/1.1\r\n\r\n").await;
        let text = String::from_utf8(response).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("<li><a href='https://youtube.com'>yt</a></li>"));
        assert!(text.contains("<li><a href='https://gmail.com'>gm</a></li>"));

        // Declared length matches the actual body.
        let (head, body) = text.split_once("\r\n\r\n").unwrap();
        let declared: usize = head
            .split("\r\n")
            .find_map(|l| l.strip_prefix("Content-Length: "))
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(declared, body.len());
    }

    #[tokio::test]
    async fn test_malformed_request_closes_without_response() {
        let (addr, _) = spawn_test_server().await;

        let response = send_request(addr, b"DELETE /yt HTTP/1.1\r\n\r\n").await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_garbage_closes_without_response() {
        let (addr, _) = spawn_test_server().await;

        let response = send_request(addr, b"\x16\x03\x01\x02\x00garbage").await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_identical_requests_get_identical_responses() {
        let (addr, _) = spawn_test_server().await;

        let first = send_request(addr, b"GET /gm HTTP/1.1\r\n\r\n").await;
        let second = send_request(addr, b"GET /gm HTTP/1.1\r\n\r\n").await;

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_stats_track_outcomes() {
        let (addr, stats) = spawn_test_server().await;

        send_request(addr, b"GET /yt HTTP/1.1\r\n\r\n").await;
        send_request(addr, b"GET /unknown HTTP/1.1\r\n\r\n").await;
        send_request(addr, b"GET /list HTTP/1.1\r\n\r\n").await;

        // Handler tasks may still be finishing their bookkeeping.
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert_eq!(stats.connections_accepted.load(Ordering::Relaxed), 3);
        assert_eq!(stats.redirects_served.load(Ordering::Relaxed), 1);
        assert_eq!(stats.not_found_served.load(Ordering::Relaxed), 1);
        assert_eq!(stats.listings_served.load(Ordering::Relaxed), 1);
        assert!(stats.bytes_written.load(Ordering::Relaxed) > 0);
    }
}
