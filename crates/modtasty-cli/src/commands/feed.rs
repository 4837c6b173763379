//! Feed command handler
//!
//! Emits the latest links as a JSON document for feed readers and scripts,
//! regardless of the output format flags.

use anyhow::Result;
use serde::Serialize;

use modtasty_core::{Link, Store};

use crate::output::print_json;

/// One feed entry
#[derive(Debug, Serialize)]
struct FeedEntry<'a> {
    id: Option<i64>,
    title: String,
    url: &'a str,
    domain: Option<String>,
    updated: Option<String>,
    tags: &'a [String],
}

impl<'a> From<&'a Link> for FeedEntry<'a> {
    fn from(link: &'a Link) -> Self {
        Self {
            id: link.id,
            title: link.display_title(),
            url: &link.url,
            domain: link.domain(),
            updated: link.created_at().map(|dt| dt.to_rfc3339()),
            tags: &link.tags,
        }
    }
}

/// Print the latest links as a feed
pub fn show(store: &Store, limit: usize) -> Result<()> {
    let links = store.get_latest(limit)?;
    let entries: Vec<FeedEntry<'_>> = links.iter().map(FeedEntry::from).collect();
    print_json(&serde_json::json!({
        "title": "modtasty",
        "entries": entries,
    }));
    Ok(())
}
