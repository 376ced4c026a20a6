//! Catalog link audit.
//!
//! # Responsibilities
//! - Check every download link the front-end embeds against the proxy's
//!   contract: under the prefix, right extension
//!
//! # Design Decisions
//! - Accepts both absolute URLs (production catalogs carry the site
//!   origin) and bare paths
//! - Reports all violations, not just the first

use url::Url;

use crate::catalog::schema::Book;
use crate::downloads::asset_path;

/// One broken download link.
#[derive(Debug)]
pub struct LinkIssue {
    pub title: String,
    pub field: &'static str,
    pub url: String,
    pub problem: LinkProblem,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LinkProblem {
    /// The link does not go through the download prefix at all.
    NotUnderPrefix,
    /// The link is under the prefix but names the wrong file type.
    WrongExtension { expected: &'static str },
}

impl std::fmt::Display for LinkIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.problem {
            LinkProblem::NotUnderPrefix => write!(
                f,
                "{}: {} = {:?} is not under the download prefix",
                self.title, self.field, self.url
            ),
            LinkProblem::WrongExtension { expected } => write!(
                f,
                "{}: {} = {:?} should point at a .{} asset",
                self.title, self.field, self.url, expected
            ),
        }
    }
}

/// The path component of a link, whether absolute or already a path.
fn link_path(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) => url.path().to_string(),
        Err(_) => link.to_string(),
    }
}

/// Check every non-empty download link in the catalog.
pub fn audit_links(books: &[Book], prefix: &str) -> Vec<LinkIssue> {
    let mut issues = Vec::new();

    for book in books {
        let links = [
            (&book.pdf_url, "pdf_url", "pdf"),
            (&book.epub_url, "epub_url", "epub"),
        ];

        for (link, field, expected) in links {
            if link.is_empty() {
                continue;
            }

            let path = link_path(link);
            match asset_path(&path, prefix) {
                None => issues.push(LinkIssue {
                    title: book.title.clone(),
                    field,
                    url: link.clone(),
                    problem: LinkProblem::NotUnderPrefix,
                }),
                Some(asset) if !asset.ends_with(&format!(".{}", expected)) => {
                    issues.push(LinkIssue {
                        title: book.title.clone(),
                        field,
                        url: link.clone(),
                        problem: LinkProblem::WrongExtension { expected },
                    })
                }
                Some(_) => {}
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(pdf_url: &str, epub_url: &str) -> Book {
        Book {
            title: "Frost at Dawn".to_string(),
            author: "Basho".to_string(),
            date: String::new(),
            haiku_count: 0,
            cover_url: String::new(),
            pdf_url: pdf_url.to_string(),
            epub_url: epub_url.to_string(),
        }
    }

    #[test]
    fn test_clean_catalog_has_no_issues() {
        let books = vec![book(
            "https://shmindle.com/dl/frost-at-dawn/frost-at-dawn.pdf",
            "/dl/frost-at-dawn/frost-at-dawn.epub",
        )];
        assert!(audit_links(&books, "/dl/").is_empty());
    }

    #[test]
    fn test_off_prefix_link_is_flagged() {
        let books = vec![book(
            "https://github.com/org/repo/releases/download/frost/frost.pdf",
            "",
        )];
        let issues = audit_links(&books, "/dl/");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].problem, LinkProblem::NotUnderPrefix);
    }

    #[test]
    fn test_swapped_extension_is_flagged() {
        let books = vec![book("/dl/frost/frost.epub", "")];
        let issues = audit_links(&books, "/dl/");
        assert_eq!(
            issues[0].problem,
            LinkProblem::WrongExtension { expected: "pdf" }
        );
    }

    #[test]
    fn test_empty_links_are_skipped() {
        let books = vec![book("", "")];
        assert!(audit_links(&books, "/dl/").is_empty());
    }
}
