//! namelink - A Tiny Named-URL Redirect Server
//!
//! This is the main entry point for the namelink server.
//! It parses the command line, seeds the name store, binds the TCP
//! listener with an explicit backlog, and hands accepted connections to
//! the connection handler.

use namelink::connection::{handle_connection, ServerStats};
use namelink::resolver::Resolver;
use namelink::store::{MemoryStore, NamedUrl, DEFAULT_CAPACITY};
use anyhow::Context;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpSocket};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Demo pairs seeded when no --link arguments are given.
const DEFAULT_LINKS: &[(&str, &str)] = &[
    ("yt", "https://youtube.com"),
    ("gm", "https://gmail.com"),
];

/// Server configuration
struct Config {
    /// Host to bind to
    host: String,
    /// Port to listen on
    port: u16,
    /// Listen backlog
    backlog: u32,
    /// Name store capacity
    capacity: usize,
    /// Seed pairs, in listing order
    links: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: namelink::DEFAULT_HOST.to_string(),
            port: namelink::DEFAULT_PORT,
            backlog: namelink::DEFAULT_BACKLOG,
            capacity: DEFAULT_CAPACITY,
            links: Vec::new(),
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    if i + 1 < args.len() {
                        config.host = args[i + 1].clone();
                        i += 2;
                    } else {
                        eprintln!("Error: --host requires a value");
                        std::process::exit(1);
                    }
                }
                "--port" | "-p" => {
                    if i + 1 < args.len() {
                        config.port = args[i + 1].parse().unwrap_or_else(|_| {
                            eprintln!("Error: invalid port number");
                            std::process::exit(1);
                        });
                        i += 2;
                    } else {
                        eprintln!("Error: --port requires a value");
                        std::process::exit(1);
                    }
                }
                "--backlog" => {
                    if i + 1 < args.len() {
                        config.backlog = args[i + 1].parse().unwrap_or_else(|_| {
                            eprintln!("Error: invalid backlog");
                            std::process::exit(1);
                        });
                        i += 2;
                    } else {
                        eprintln!("Error: --backlog requires a value");
                        std::process::exit(1);
                    }
                }
                "--capacity" => {
                    if i + 1 < args.len() {
                        config.capacity = args[i + 1].parse().unwrap_or_else(|_| {
                            eprintln!("Error: invalid capacity");
                            std::process::exit(1);
                        });
                        i += 2;
                    } else {
                        eprintln!("Error: --capacity requires a value");
                        std::process::exit(1);
                    }
                }
                "--link" | "-l" => {
                    if i + 1 < args.len() {
                        match parse_link(&args[i + 1]) {
                            Ok(pair) => config.links.push(pair),
                            Err(msg) => {
                                eprintln!("Error: {}", msg);
                                std::process::exit(1);
                            }
                        }
                        i += 2;
                    } else {
                        eprintln!("Error: --link requires a value");
                        std::process::exit(1);
                    }
                }
                "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("namelink version {}", namelink::VERSION);
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                    print_help();
                    std::process::exit(1);
                }
            }
        }

        if config.links.is_empty() {
            config.links = DEFAULT_LINKS
                .iter()
                .map(|(n, u)| (n.to_string(), u.to_string()))
                .collect();
        }

        config
    }

    /// Returns the bind address as a string
    fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses a `<name>=<url>` seed argument.
///
/// Stored names never carry a leading `/`; one supplied by the operator is
/// stripped here so the store and the resolver always agree on the key.
fn parse_link(raw: &str) -> Result<(String, String), String> {
    let (name, url) = raw
        .split_once('=')
        .ok_or_else(|| format!("--link expects <name>=<url>, got '{}'", raw))?;

    let name = name.strip_prefix('/').unwrap_or(name);
    if name.is_empty() {
        return Err(format!("--link has an empty name: '{}'", raw));
    }
    if url.is_empty() {
        return Err(format!("--link has an empty URL: '{}'", raw));
    }

    Ok((name.to_string(), url.to_string()))
}

fn print_help() {
    println!(
        r#"
namelink - A Tiny Named-URL Redirect Server

USAGE:
    namelink [OPTIONS]

OPTIONS:
    -h, --host <HOST>        Host to bind to (default: 0.0.0.0)
    -p, --port <PORT>        Port to listen on (default: 8000)
        --backlog <N>        Listen backlog (default: 32)
        --capacity <N>       Name store capacity (default: 16)
    -l, --link <NAME>=<URL>  Register a named URL (repeatable)
    -v, --version            Print version information
        --help               Print this help message

EXAMPLES:
    namelink                               # Demo pairs on 0.0.0.0:8000
    namelink --port 8080                   # Different port
    namelink -l yt=https://youtube.com \
             -l gm=https://gmail.com       # Explicit seed pairs

USING:
    $ curl -i localhost:8000/yt            # 308 to https://youtube.com
    $ curl -i localhost:8000/yt/watch      # suffix forwarded
    $ curl localhost:8000/list             # every registered pair
"#
    );
}

fn print_banner(config: &Config) {
    println!(
        r#"
namelink v{} - Named-URL Redirect Server
─────────────────────────────────────────
Serving {} name(s) on {}

Use Ctrl+C to shutdown gracefully.
"#,
        namelink::VERSION,
        config.links.len(),
        config.bind_address()
    );
}

/// Builds and seeds the name store from the configuration.
///
/// Name uniqueness is the seeder's job, so duplicates are a fatal startup
/// error here rather than a surprise at lookup time.
fn seed_store(config: &Config) -> anyhow::Result<MemoryStore> {
    let mut store = MemoryStore::with_capacity(config.capacity);
    let mut seen = HashSet::new();

    for (name, url) in &config.links {
        if !seen.insert(name.as_str()) {
            anyhow::bail!("duplicate link name '{}'", name);
        }
        store
            .insert(NamedUrl::new(name.clone(), url.clone()))
            .with_context(|| format!("seeding link '{}' failed", name))?;
    }

    Ok(store)
}

/// Binds the listening socket with the configured backlog.
fn bind_listener(config: &Config) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.bind_address()))?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .context("creating the listening socket failed")?;

    socket
        .bind(addr)
        .with_context(|| format!("binding {} failed", addr))?;

    socket
        .listen(config.backlog)
        .context("listening failed")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let config = Config::from_args();

    // Set up logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Print the banner
    print_banner(&config);

    // Seed the name store (shared read-only across all connections)
    let store = seed_store(&config)?;
    info!(
        entries = store.len(),
        capacity = config.capacity,
        "name store seeded"
    );

    let resolver = Resolver::new(Arc::new(store));
    let stats = Arc::new(ServerStats::new());

    // Bind the TCP listener with the configured backlog
    let listener = bind_listener(&config)?;
    info!("listening on {}", config.bind_address());

    // Set up graceful shutdown
    let shutdown = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received, stopping server...");
    };

    // Main accept loop
    tokio::select! {
        _ = accept_loop(listener, resolver, Arc::clone(&stats)) => {}
        _ = shutdown => {}
    }

    info!(
        connections = stats.connections_accepted.load(Ordering::Relaxed),
        redirects = stats.redirects_served.load(Ordering::Relaxed),
        listings = stats.listings_served.load(Ordering::Relaxed),
        not_found = stats.not_found_served.load(Ordering::Relaxed),
        "server shutdown complete"
    );
    Ok(())
}

/// Main loop that accepts incoming connections
async fn accept_loop(listener: TcpListener, resolver: Resolver, stats: Arc<ServerStats>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let resolver = resolver.clone();
                let stats = Arc::clone(&stats);

                // Spawn a task to handle this connection
                tokio::spawn(async move {
                    handle_connection(stream, addr, resolver, stats).await;
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
