//! Upstream release-host client.
//!
//! # Responsibilities
//! - Hold the shared HTTP client (connection pool) for outbound fetches
//! - Follow redirect chains transparently: release hosts answer asset
//!   requests with a redirect to storage, and the caller must only ever
//!   see the final resource
//!
//! # Design Decisions
//! - One GET per inbound request; resilience is the caller's 404/502 mapping
//! - No timeout override beyond the transport defaults

/// HTTP client for the release host.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new() -> Self {
        // The default redirect policy follows up to 10 hops, which covers
        // the single hop release hosts actually use.
        let client = reqwest::Client::builder()
            .user_agent(concat!("download-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build upstream HTTP client");

        Self { client }
    }

    /// Issue a single GET for the given asset URL.
    ///
    /// The response is returned with its body unread so the caller can
    /// stream it. Transport failures surface as `reqwest::Error`.
    pub async fn fetch(&self, url: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.client.get(url).send().await
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}
