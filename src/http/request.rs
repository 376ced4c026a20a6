//! Request identity.
//!
//! # Responsibilities
//! - Name the request ID header shared by the set/propagate layers
//! - Extract the ID for handler logging
//!
//! # Design Decisions
//! - IDs are assigned by `tower_http`'s request-id layers as early as
//!   possible and echoed on every response
//! - A request that somehow has no ID logs as "unknown" rather than
//!   failing the request

use axum::http::{HeaderMap, HeaderName};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Read the request ID assigned by the middleware stack.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_id_reads_header() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers), "abc-123");
    }

    #[test]
    fn test_missing_request_id_is_unknown() {
        assert_eq!(request_id(&HeaderMap::new()), "unknown");
    }
}
