//! Catalog data subsystem.
//!
//! # Data Flow
//! ```text
//! site/catalog.json  → schema.rs (Book records)
//! site/ratings.json  → schema.rs (ratings summary + leaderboard)
//!     → audit.rs (are the embedded download links under our prefix?)
//! ```
//!
//! # Design Decisions
//! - The proxy never reads these documents on the request path; they are
//!   static files served by the site branch
//! - The schema lives here so the CLI can check that the links the
//!   front-end embeds actually resolve through the download branch

pub mod audit;
pub mod schema;

use std::path::Path;

use thiserror::Error;

pub use audit::{audit_links, LinkIssue};
pub use schema::{Book, Poem, PoemSource, Ratings, RatingsSummary};

/// Error type for catalog loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load the book catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Vec<Book>, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
