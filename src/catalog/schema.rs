//! Data model for the static site's JSON documents.
//!
//! The shapes mirror what the site build pipeline emits: `catalog.json`
//! is a flat array of books, `ratings.json` is an aggregate summary plus
//! a full leaderboard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One book in `catalog.json`.
///
/// `pdf_url`/`epub_url` point at download-prefix paths; the audit module
/// checks that contract.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub haiku_count: u32,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub pdf_url: String,
    #[serde(default)]
    pub epub_url: String,
}

/// Root of `ratings.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Ratings {
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub total_matches: u64,
    pub summary: RatingsSummary,
    #[serde(default)]
    pub top_ai: Vec<Poem>,
    #[serde(default)]
    pub top_human: Vec<Poem>,
    #[serde(default)]
    pub poems: Vec<Poem>,
}

/// Aggregate AI-vs-human stats.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RatingsSummary {
    pub ai_count: u32,
    pub human_count: u32,
    pub ai_avg_elo: f64,
    pub human_avg_elo: f64,
    pub ai_wins: u64,
    pub human_wins: u64,
    pub draws: u64,
}

/// One rated poem on the leaderboard.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Poem {
    pub id: String,
    pub lines: Vec<String>,
    #[serde(default)]
    pub source: Option<PoemSource>,
    pub author: String,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub translator: Option<String>,
    pub elo: f64,
    #[serde(default)]
    pub matches: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub draws: u32,
    /// Rolling per-dimension averages (image precision, cut, economy, ...).
    #[serde(default)]
    pub dim_averages: BTreeMap<String, f64>,
    #[serde(default)]
    pub last_reasoning: Option<String>,
}

/// Where a poem came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PoemSource {
    Ai,
    Human,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_parses_with_missing_urls() {
        let book: Book = serde_json::from_str(
            r#"{"title": "Frost at Dawn", "author": "Basho", "haiku_count": 40}"#,
        )
        .unwrap();
        assert_eq!(book.title, "Frost at Dawn");
        assert!(book.pdf_url.is_empty());
    }

    #[test]
    fn test_ratings_parse() {
        let ratings: Ratings = serde_json::from_str(
            r#"{
                "total_matches": 3,
                "summary": {"ai_count": 1, "human_count": 1, "ai_avg_elo": 1512.5},
                "poems": [{
                    "id": "p1",
                    "lines": ["old pond", "a frog jumps in", "sound of water"],
                    "source": "human",
                    "author": "Basho",
                    "elo": 1540.0,
                    "wins": 2,
                    "dim_averages": {"economy": 4.5}
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(ratings.summary.ai_count, 1);
        assert_eq!(ratings.poems[0].source, Some(PoemSource::Human));
        assert_eq!(ratings.poems[0].dim_averages["economy"], 4.5);
    }
}
