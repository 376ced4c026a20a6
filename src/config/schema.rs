//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the download proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, connection limits).
    pub listener: ListenerConfig,

    /// Upstream release host the download branch fetches from.
    pub upstream: UpstreamConfig,

    /// Download branch behavior (prefix, header rewriting).
    pub downloads: DownloadConfig,

    /// Static site served for everything outside the download prefix.
    pub site: SiteConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Upstream release host configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL for release assets. Asset paths are appended verbatim,
    /// so the value must not end with a slash (normalized on load).
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://github.com/leoshvartsman/haiku-books/releases/download"
                .to_string(),
        }
    }
}

/// Download branch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Path prefix that selects the download branch.
    /// Must start and end with '/'.
    pub path_prefix: String,

    /// Rewrite Content-Type from the asset extension (.pdf, .epub).
    /// When false, the upstream Content-Type is passed through untouched.
    pub infer_content_type: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            path_prefix: "/dl/".to_string(),
            infer_content_type: true,
        }
    }
}

/// Static site configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding the built front-end (index.html, catalog.json, ...).
    pub root: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("site"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
