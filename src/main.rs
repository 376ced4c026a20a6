//! Download Redirect Proxy
//!
//! Edge service for the haiku books site, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │               DOWNLOAD PROXY                  │
//!                      │                                               │
//!   GET /dl/{slug}/{f} │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ───────────────────┼─▶│  http   │──▶│downloads │──▶│ upstream  │──┼──▶ Release host
//!                      │  │ server  │   │ rewrite  │   │  client   │  │    (GitHub)
//!                      │  └────┬────┘   └──────────┘   └─────┬─────┘  │
//!                      │       │                             │        │
//!   any other path     │       ▼                             ▼        │
//!   ───────────────────┼▶ static site              header rewrite +   │
//!                      │  (catalog front-end)      streamed body      │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐ │
//!                      │  │         Cross-Cutting Concerns           │ │
//!                      │  │  config · observability · lifecycle      │ │
//!                      │  └─────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::Path;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use download_proxy::config::{loader, watcher::ConfigWatcher, ProxyConfig};
use download_proxy::http::HttpServer;
use download_proxy::lifecycle::{signals, Shutdown};
use download_proxy::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The single optional argument is the config file path.
    let config_path = std::env::args().nth(1);
    let config = match &config_path {
        Some(path) => loader::load_config(Path::new(path))?,
        None => ProxyConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!("download-proxy v0.1.0 starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        upstream = %config.upstream.base_url,
        prefix = %config.downloads.path_prefix,
        site_root = %config.site.root.display(),
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Metrics exporter on its own listener
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Watch the config file so upstream settings reload without a restart.
    // The watcher handle must outlive the server for events to fire.
    let (config_updates, _watcher_guard) = match &config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(Path::new(path));
            let guard = watcher.run()?;
            (updates, Some(guard))
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server
        .run(listener, config_updates, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
