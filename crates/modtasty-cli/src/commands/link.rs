//! Link command handlers

use anyhow::{anyhow, Context, Result};
use tracing::warn;

use modtasty_core::{parse_tag_list, Link, Store};

use crate::output::Output;
use crate::prompt::{confirm, is_interactive, prompt_with_default};
use crate::title::{fetch_title, validate_url};

/// Changes requested on the command line for `edit`
#[derive(Debug, Default)]
pub struct LinkEdits {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Option<String>,
}

impl LinkEdits {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.tags.is_none()
    }

    fn apply(self, link: &mut Link) {
        if let Some(title) = self.title {
            link.set_title(title);
        }
        if let Some(url) = self.url {
            link.set_url(url.trim());
        }
        if let Some(tags) = self.tags {
            link.set_tags(parse_tag_list(&tags));
        }
    }
}

/// Save a new link, fetching its title unless one is given
///
/// An already bookmarked URL is shown instead of being saved twice.
pub async fn add(
    store: &Store,
    url: String,
    tags: Vec<String>,
    title: Option<String>,
    output: &Output,
) -> Result<()> {
    let url = url.trim();
    if let Some(existing) = store.get_by_url(url)? {
        output.message("Already bookmarked:");
        output.print_link(&existing);
        return Ok(());
    }

    validate_url(url)?;

    let title = match title {
        Some(title) => title,
        None => fetch_title(url).await.map_err(|e| {
            warn!("Title fetch failed for {}: {}", url, e);
            anyhow::Error::new(e).context(format!("Could not bookmark {}", url))
        })?,
    };

    let mut link = Link::with_title(url, title);
    link.set_tags(tags.iter().flat_map(|t| parse_tag_list(t)));

    let saved = store.save(&mut link).context("Failed to save link")?;

    output.success(&format!("Saved link {}", saved.id.unwrap_or_default()));
    output.print_link(&saved);
    Ok(())
}

/// Show a single link
pub fn show(store: &Store, id: i64, output: &Output) -> Result<()> {
    let link = store
        .get_by_id(id)?
        .ok_or_else(|| anyhow!("Link not found: {}", id))?;

    output.print_link(&link);
    Ok(())
}

/// Edit a link from flags, or interactively when none are given
pub fn edit(store: &Store, id: i64, edits: LinkEdits, output: &Output) -> Result<()> {
    let mut link = store
        .get_by_id(id)?
        .ok_or_else(|| anyhow!("Link not found: {}", id))?;

    if edits.is_empty() {
        if !is_interactive() {
            anyhow::bail!("Nothing to change. Pass --title, --url or --tags.");
        }
        prompt_edits(&link)?.apply(&mut link);
    } else {
        edits.apply(&mut link);
    }

    validate_url(&link.url)?;
    let saved = store.save(&mut link).context("Failed to update link")?;

    output.success("Link updated");
    output.print_link(&saved);
    Ok(())
}

fn prompt_edits(link: &Link) -> Result<LinkEdits> {
    println!("Editing link: {}", id_label(link));
    println!("Press Enter to keep current value, or type new value.\n");

    Ok(LinkEdits {
        title: prompt_with_default("Title", &link.title)?,
        url: prompt_with_default("URL", &link.url)?,
        tags: clear_marker(prompt_with_default(
            "Tags (comma-separated, - to clear)",
            &link.tags.join(", "),
        )?),
    })
}

/// A lone `-` answer clears the field instead of keeping it
fn clear_marker(answer: Option<String>) -> Option<String> {
    match answer.as_deref() {
        Some("-") => Some(String::new()),
        _ => answer,
    }
}

/// Delete a link
pub fn delete(store: &Store, id: i64, output: &Output) -> Result<()> {
    let link = store
        .get_by_id(id)?
        .ok_or_else(|| anyhow!("Link not found: {}", id))?;

    if output.should_prompt() && is_interactive() {
        println!("Delete link: {} - {}", id_label(&link), link.display_title());
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete_by_id(id).context("Failed to delete link")?;

    output.success(&format!("Deleted link: {}", id));
    Ok(())
}

/// List the latest links, or the links carrying a tag
pub fn list(store: &Store, tag: Option<String>, limit: usize, output: &Output) -> Result<()> {
    let links = select_links(store, tag.as_deref(), limit)?;
    output.print_links(&links);
    Ok(())
}

fn select_links(store: &Store, tag: Option<&str>, limit: usize) -> Result<Vec<Link>> {
    let links = match tag {
        Some(t) => {
            let mut links = store.get_by_tag(&modtasty_core::normalize_tag(t))?;
            links.truncate(limit);
            links
        }
        None => store.get_latest(limit)?,
    };
    Ok(links)
}

/// Search link titles
pub fn search(store: &Store, query: String, output: &Output) -> Result<()> {
    let links = store.search(&query)?;
    output.print_links(&links);
    Ok(())
}

fn id_label(link: &Link) -> String {
    link.id.map(|id| id.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_apply() {
        let mut link = Link::with_title("http://a.com", "A");
        link.set_tags(["old"]);

        LinkEdits {
            title: Some("B".to_string()),
            url: None,
            tags: Some("New, other ,new".to_string()),
        }
        .apply(&mut link);

        assert_eq!(link.title, "B");
        assert_eq!(link.url, "http://a.com");
        assert_eq!(link.tags, vec!["new", "other"]);
    }

    #[test]
    fn test_empty_edits() {
        assert!(LinkEdits::default().is_empty());
        let edits = LinkEdits {
            url: Some("http://b.com".to_string()),
            ..LinkEdits::default()
        };
        assert!(!edits.is_empty());
    }

    #[test]
    fn test_edits_can_clear_tags() {
        let mut link = Link::new("http://a.com");
        link.set_tags(["x"]);

        LinkEdits {
            tags: Some(String::new()),
            ..LinkEdits::default()
        }
        .apply(&mut link);

        assert!(link.tags.is_empty());
    }

    #[tokio::test]
    async fn test_add_with_title_and_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_path(dir.path().join("modtasty.db")).unwrap();
        let output = Output::new(crate::output::OutputFormat::Quiet);

        add(
            &store,
            "http://example.com".to_string(),
            vec!["A, b".to_string(), "c".to_string()],
            Some("Example".to_string()),
            &output,
        )
        .await
        .unwrap();

        // Second add of the same URL does not create another row
        add(
            &store,
            "http://example.com".to_string(),
            vec![],
            Some("Other".to_string()),
            &output,
        )
        .await
        .unwrap();

        assert_eq!(store.link_count().unwrap(), 1);
        let link = store.get_by_url("http://example.com").unwrap().unwrap();
        assert_eq!(link.title, "Example");
        assert_eq!(link.tags, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_add_trims_url_before_duplicate_check() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_path(dir.path().join("modtasty.db")).unwrap();
        let output = Output::new(crate::output::OutputFormat::Quiet);

        add(
            &store,
            " http://example.com ".to_string(),
            vec![],
            Some("Example".to_string()),
            &output,
        )
        .await
        .unwrap();
        add(
            &store,
            "http://example.com".to_string(),
            vec![],
            Some("Again".to_string()),
            &output,
        )
        .await
        .unwrap();

        assert_eq!(store.link_count().unwrap(), 1);
        let link = store.get_by_url("http://example.com").unwrap().unwrap();
        assert_eq!(link.url, "http://example.com");
        assert_eq!(link.title, "Example");
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_path(dir.path().join("modtasty.db")).unwrap();
        let output = Output::new(crate::output::OutputFormat::Quiet);

        let result = add(
            &store,
            "not a url".to_string(),
            vec![],
            Some("Title".to_string()),
            &output,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(store.link_count().unwrap(), 0);
    }

    #[test]
    fn test_edit_trims_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_path(dir.path().join("modtasty.db")).unwrap();
        let output = Output::new(crate::output::OutputFormat::Quiet);
        let id = store
            .save(&mut Link::with_title("http://a.com", "A"))
            .unwrap()
            .id
            .unwrap();

        edit(
            &store,
            id,
            LinkEdits {
                url: Some("  http://b.com\n".to_string()),
                ..LinkEdits::default()
            },
            &output,
        )
        .unwrap();

        let link = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(link.url, "http://b.com");
        assert!(store.get_by_url("http://b.com").unwrap().is_some());
    }

    #[test]
    fn test_clear_marker() {
        assert_eq!(clear_marker(Some("-".to_string())), Some(String::new()));
        assert_eq!(clear_marker(Some("a, b".to_string())), Some("a, b".to_string()));
        assert_eq!(clear_marker(None), None);
    }

    #[test]
    fn test_list_by_tag_honors_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_path(dir.path().join("modtasty.db")).unwrap();
        let output = Output::new(crate::output::OutputFormat::Quiet);
        for i in 0..3 {
            let mut link = Link::with_title(format!("http://{}.com", i), "t");
            link.set_tags(["rust"]);
            store.save(&mut link).unwrap();
        }

        assert_eq!(store.get_by_tag("rust").unwrap().len(), 3);
        let links = select_links(&store, Some("Rust"), 2).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "http://2.com");
        assert!(select_links(&store, Some("rust"), 0).unwrap().is_empty());
        list(&store, Some("rust".to_string()), 2, &output).unwrap();
    }

    #[test]
    fn test_edit_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_path(dir.path().join("modtasty.db")).unwrap();
        let output = Output::new(crate::output::OutputFormat::Quiet);
        let mut link = Link::with_title("http://a.com", "A");
        link.set_tags(["x", "y"]);
        let id = store.save(&mut link).unwrap().id.unwrap();

        edit(
            &store,
            id,
            LinkEdits {
                tags: Some("y".to_string()),
                ..LinkEdits::default()
            },
            &output,
        )
        .unwrap();
        let (names, _) = store.list_with_counts().unwrap();
        assert_eq!(names, vec!["y"]);

        delete(&store, id, &output).unwrap();
        assert!(store.get_by_id(id).unwrap().is_none());
        assert!(store.list_with_counts().unwrap().0.is_empty());

        assert!(show(&store, id, &output).is_err());
    }
}
