//! Data models for modtasty
//!
//! Defines the core data structures: Link and Tag.
//! Tag names are normalized (trimmed, lowercased) on the way in, so the
//! storage layer can treat every name it receives as already normalized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder used when a link has no known title
pub const UNTITLED: &str = "Untitled";

/// A saved bookmark
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    /// Row id, assigned by the store on first save
    pub id: Option<i64>,
    /// Display title (usually fetched from the page)
    pub title: String,
    /// The URL
    pub url: String,
    /// Seconds since epoch, set once on first save
    pub created: Option<i64>,
    /// Normalized tag names, sorted and unique
    pub tags: Vec<String>,
}

/// A raw `links` row as stored on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRow {
    pub id: i64,
    pub title: Option<String>,
    pub url: String,
    pub created: i64,
}

impl Link {
    /// Create an unsaved link for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Create an unsaved link with a known title
    pub fn with_title(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Whether the link has been persisted yet
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Update the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Update the URL
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Add a tag, normalizing it first
    pub fn add_tag(&mut self, tag: &str) {
        let tag = normalize_tag(tag);
        if tag.is_empty() {
            return;
        }
        if let Err(pos) = self.tags.binary_search(&tag) {
            self.tags.insert(pos, tag);
        }
    }

    /// Remove a tag
    pub fn remove_tag(&mut self, tag: &str) {
        let tag = normalize_tag(tag);
        self.tags.retain(|t| *t != tag);
    }

    /// Replace all tags
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.clear();
        for tag in tags {
            self.add_tag(tag.as_ref());
        }
    }

    /// Creation date as "05 Mar 2021" (UTC)
    pub fn created_date(&self) -> Option<String> {
        self.created_at()
            .map(|dt| dt.format("%d %b %Y").to_string())
    }

    /// Creation time as a UTC datetime
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Host component of the URL
    pub fn domain(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }

    /// Title for display, falling back to the URL when none is known
    pub fn display_title(&self) -> String {
        if self.title.trim().is_empty() {
            format!("{} ({})", UNTITLED, self.url)
        } else {
            self.title.clone()
        }
    }
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Self {
            id: Some(row.id),
            title: row.title.unwrap_or_default(),
            url: row.url,
            created: Some(row.created),
            tags: Vec::new(),
        }
    }
}

/// A tag row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Normalize a tag name: trim whitespace and lowercase
pub fn normalize_tag(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Parse comma-separated tag input into normalized, sorted, unique names
///
/// Empty entries (e.g. from "a,,b" or a trailing comma) are dropped.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    let mut link = Link::default();
    link.set_tags(input.split(','));
    link.tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_new() {
        let link = Link::new("https://example.com");
        assert_eq!(link.url, "https://example.com");
        assert!(link.title.is_empty());
        assert!(link.id.is_none());
        assert!(link.created.is_none());
        assert!(link.tags.is_empty());
        assert!(!link.is_saved());
    }

    #[test]
    fn test_link_from_row() {
        let link = Link::from(LinkRow {
            id: 7,
            title: None,
            url: "http://example.com/a".to_string(),
            created: 0,
        });
        assert_eq!(link.id, Some(7));
        assert_eq!(link.title, "");
        assert_eq!(link.created, Some(0));
        assert!(link.is_saved());
    }

    #[test]
    fn test_display_title() {
        let link = Link::new("http://example.com");
        assert_eq!(link.display_title(), "Untitled (http://example.com)");

        let link = Link::with_title("http://example.com", "Example");
        assert_eq!(link.display_title(), "Example");

        let link = Link::with_title("http://example.com", "   ");
        assert_eq!(link.display_title(), "Untitled (http://example.com)");
    }

    #[test]
    fn test_domain() {
        let link = Link::new("https://www.rust-lang.org/learn?x=1");
        assert_eq!(link.domain(), Some("www.rust-lang.org".to_string()));

        let link = Link::new("not a url");
        assert_eq!(link.domain(), None);
    }

    #[test]
    fn test_created_date() {
        let mut link = Link::new("http://example.com");
        assert_eq!(link.created_date(), None);

        // 2021-03-05T12:00:00Z
        link.created = Some(1_614_945_600);
        assert_eq!(link.created_date(), Some("05 Mar 2021".to_string()));
    }

    #[test]
    fn test_tags_normalized_and_sorted() {
        let mut link = Link::new("http://example.com");
        link.add_tag("  Rust ");
        link.add_tag("programming");
        link.add_tag("RUST");
        link.add_tag("   ");
        assert_eq!(link.tags, vec!["programming", "rust"]);

        link.remove_tag("Rust");
        assert_eq!(link.tags, vec!["programming"]);

        link.set_tags(["y", "X", "x "]);
        assert_eq!(link.tags, vec!["x", "y"]);
    }

    #[test]
    fn test_parse_tag_list() {
        assert_eq!(parse_tag_list("b, A ,a,,c,"), vec!["a", "b", "c"]);
        assert!(parse_tag_list("").is_empty());
        assert!(parse_tag_list(" , ").is_empty());
    }

    #[test]
    fn test_tag_display() {
        let tag = Tag {
            id: 1,
            name: "rust".to_string(),
        };
        assert_eq!(format!("{}", tag), "rust");
    }

    #[test]
    fn test_link_serialization() {
        let mut link = Link::with_title("https://example.com", "Example");
        link.set_tags(["a", "b"]);
        let json = serde_json::to_string(&link).unwrap();
        let deserialized: Link = serde_json::from_str(&json).unwrap();
        assert_eq!(link, deserialized);
    }
}
