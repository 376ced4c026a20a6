//! Download branch subsystem.
//!
//! # Data Flow
//! ```text
//! GET /dl/{slug}/{file}
//!     → rewrite.rs (strip prefix, build release-asset URL)
//!     → upstream.rs (single GET, redirects followed transparently)
//!     → http/response.rs (header rewrite)
//!     → streamed back to the client
//! ```
//!
//! # Design Decisions
//! - One upstream attempt per request: no retries, no backoff
//! - Upstream non-success collapses to a fixed 404; no detail leaks
//! - Bodies are streamed, never buffered, so memory use is bounded
//!   independent of asset size

pub mod rewrite;
pub mod upstream;

pub use rewrite::{asset_path, upstream_url};
pub use upstream::UpstreamClient;
