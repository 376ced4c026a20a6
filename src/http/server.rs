//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Build the Axum router: download route plus static site fallback
//! - Wire up middleware (request ID, tracing, metrics)
//! - Dispatch download requests: rewrite, fetch upstream, adjust headers
//! - Serve with graceful shutdown
//! - Apply config hot reloads to the shared runtime settings

use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::downloads::{asset_path, upstream_url, UpstreamClient};
use crate::http::request::request_id;
use crate::http::response::download_headers;
use crate::observability::metrics;

/// Settings the download handler reads per request. Hot reload swaps the
/// whole value; in-flight requests keep the snapshot they loaded.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub base_url: String,
    pub infer_content_type: bool,
}

impl From<&ProxyConfig> for RuntimeSettings {
    fn from(config: &ProxyConfig) -> Self {
        Self {
            base_url: config.upstream.base_url.trim_end_matches('/').to_string(),
            infer_content_type: config.downloads.infer_content_type,
        }
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<ArcSwap<RuntimeSettings>>,
    pub upstream: UpstreamClient,
    /// Download prefix as compiled into the route table. Fixed for the
    /// lifetime of the server; changing it requires a restart.
    pub prefix: Arc<str>,
}

/// HTTP server for the download proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
    settings: Arc<ArcSwap<RuntimeSettings>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let settings = Arc::new(ArcSwap::from_pointee(RuntimeSettings::from(&config)));

        let state = AppState {
            settings: settings.clone(),
            upstream: UpstreamClient::new(),
            prefix: Arc::from(config.downloads.path_prefix.as_str()),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            settings,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Routes are compiled here and immutable afterwards: the download
    /// prefix and site root only change on restart.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let download_route = format!("{}{{*asset}}", config.downloads.path_prefix);

        let prefix = config.downloads.path_prefix.clone();
        let track_requests = middleware::from_fn(move |req: Request, next: Next| {
            let prefix = prefix.clone();
            async move {
                let start = Instant::now();
                let method = req.method().clone();
                let branch = if req.uri().path().starts_with(&prefix) {
                    "download"
                } else {
                    "site"
                };
                let response = next.run(req).await;
                metrics::record_request(method.as_str(), response.status().as_u16(), branch, start);
                response
            }
        });

        Router::new()
            .route(&download_route, get(download_handler))
            .with_state(state)
            .fallback_service(ServeDir::new(&config.site.root))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(track_requests),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ProxyConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        // Apply hot reloads for as long as the watcher is alive.
        let settings = self.settings.clone();
        let startup_config = self.config.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                if new_config.listener.bind_address != startup_config.listener.bind_address
                    || new_config.downloads.path_prefix != startup_config.downloads.path_prefix
                    || new_config.site.root != startup_config.site.root
                {
                    tracing::warn!(
                        "Listener, prefix, and site changes need a restart; applying the rest"
                    );
                }
                let new_settings = RuntimeSettings::from(&new_config);
                tracing::info!(
                    base_url = %new_settings.base_url,
                    infer_content_type = new_settings.infer_content_type,
                    "Applying reloaded configuration"
                );
                settings.store(Arc::new(new_settings));
            }
        });

        let app = self.router.into_make_service();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Handler for the download branch.
/// Rewrites the path to the release host, fetches once, adjusts headers.
async fn download_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let request_id = request_id(&headers).to_string();
    let settings = state.settings.load_full();

    // The route table guarantees the prefix; an empty remainder still means
    // there is nothing to fetch.
    let asset = match asset_path(uri.path(), &state.prefix) {
        Some(asset) => asset.to_string(),
        None => return (StatusCode::NOT_FOUND, "File not found").into_response(),
    };

    let url = upstream_url(&settings.base_url, &asset);

    tracing::debug!(
        request_id = %request_id,
        url = %url,
        "Proxying download"
    );

    match state.upstream.fetch(&url).await {
        Ok(upstream) if upstream.status().is_success() => {
            let status = upstream.status();
            let response_headers =
                download_headers(upstream.headers(), &asset, settings.infer_content_type);

            let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
            *response.status_mut() = status;
            *response.headers_mut() = response_headers;
            response
        }
        Ok(upstream) => {
            // Missing asset and unreachable release are indistinguishable to
            // the caller; upstream headers are dropped with the status.
            tracing::info!(
                request_id = %request_id,
                status = %upstream.status(),
                url = %url,
                "Upstream did not serve the asset"
            );
            (StatusCode::NOT_FOUND, "File not found").into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                url = %url,
                "Upstream request failed"
            );
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
