//! Path rewriting for the download branch.
//!
//! # Responsibilities
//! - Strip the configured prefix from a request path
//! - Build the upstream release-asset URL
//!
//! # Design Decisions
//! - Pure string functions, no allocation beyond the final URL
//! - The asset remainder keeps its own path separators; the slug and
//!   filename are used verbatim in the upstream URL

/// Strip the download prefix from a request path.
///
/// Returns the asset path (`{slug}/{file}`, no leading slash), or `None`
/// when the path is outside the prefix or names no asset at all.
pub fn asset_path<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix).filter(|rest| !rest.is_empty())
}

/// Build the upstream URL for an asset path.
///
/// The base is expected without a trailing slash (config normalizes it),
/// so the joined URL is `{base}/{slug}/{file}`.
pub fn upstream_url(base_url: &str, asset: &str) -> String {
    format!("{}/{}", base_url, asset)
}
