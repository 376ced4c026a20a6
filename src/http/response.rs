//! Response transformation for proxied downloads.
//!
//! # Responsibilities
//! - Copy upstream end-to-end headers onto the client response
//! - Strip hop-by-hop headers (they describe the upstream connection)
//! - Force in-browser rendering and cross-origin access
//! - Rewrite Content-Type from the asset extension
//!
//! # Design Decisions
//! - `Content-Disposition: inline` so browsers preview PDFs/EPUBs instead
//!   of forcing a download
//! - `Access-Control-Allow-Origin: *` so the static front-end can fetch
//!   assets from a different host
//! - Unknown extensions keep whatever Content-Type the upstream sent

use std::path::Path;

use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_DISPOSITION,
    CONTENT_TYPE,
};

/// Headers that belong to the upstream connection, not this response.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Content-Type derived from the asset extension, for the formats the
/// catalog actually serves.
pub fn inferred_content_type(asset: &str) -> Option<HeaderValue> {
    match Path::new(asset).extension()?.to_str()? {
        "pdf" => Some(HeaderValue::from_static("application/pdf")),
        "epub" => Some(HeaderValue::from_static("application/epub+zip")),
        _ => None,
    }
}

/// Build the client-facing header set for a successful upstream response.
pub fn download_headers(
    upstream: &HeaderMap,
    asset: &str,
    infer_content_type: bool,
) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len() + 2);

    for (name, value) in upstream {
        if !is_hop_by_hop(name) {
            headers.append(name.clone(), value.clone());
        }
    }

    headers.insert(CONTENT_DISPOSITION, HeaderValue::from_static("inline"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

    if infer_content_type {
        if let Some(content_type) = inferred_content_type(asset) {
            headers.insert(CONTENT_TYPE, content_type);
        }
    }

    headers
}
