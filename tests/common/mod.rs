//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use download_proxy::config::ProxyConfig;
use download_proxy::http::HttpServer;
use download_proxy::lifecycle::Shutdown;

/// Serve an Axum router on an ephemeral port as a mock upstream.
#[allow(dead_code)]
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

/// A proxy instance running in the test process.
///
/// Keep the struct alive for the duration of the test: dropping the
/// shutdown handle stops the server.
pub struct TestProxy {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_updates: mpsc::UnboundedSender<ProxyConfig>,
}

/// Run the proxy on an ephemeral port with the given configuration.
pub async fn spawn_proxy(mut config: ProxyConfig) -> TestProxy {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();
    config.observability.metrics_enabled = false;

    let (config_updates, updates_rx) = mpsc::unbounded_channel();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, updates_rx, server_shutdown).await;
    });

    TestProxy {
        addr,
        shutdown,
        config_updates,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
