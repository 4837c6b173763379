//! Read-only link listings
//!
//! Every listing is ordered newest first (`created` descending, then id
//! descending so links saved within the same second keep insertion order).

use rusqlite::{params, Connection, Params, Result};

use crate::models::Link;
use crate::storage::{links, tags};

/// Default number of links returned by [`latest`]
pub const DEFAULT_LATEST_LIMIT: usize = 20;

/// The most recently created links
pub fn latest(conn: &Connection, limit: usize) -> Result<Vec<Link>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    query_links(
        conn,
        &format!(
            "SELECT {} FROM links ORDER BY created DESC, id DESC LIMIT ?",
            links::LINK_COLUMNS
        ),
        params![limit],
    )
}

/// Links carrying the given tag; empty when the tag does not exist
pub fn by_tag(conn: &Connection, tag_name: &str) -> Result<Vec<Link>> {
    let Some(tag) = tags::tag_by_name(conn, tag_name)? else {
        return Ok(Vec::new());
    };

    query_links(
        conn,
        r#"
        SELECT l.id, l.title, l.url, l.created
        FROM links l
        JOIN link_tag lt ON l.id = lt.link_id
        WHERE lt.tag_id = ?
        ORDER BY l.created DESC, l.id DESC
        "#,
        params![tag.id],
    )
}

/// Links whose title contains `text`, ignoring ASCII case
pub fn search(conn: &Connection, text: &str) -> Result<Vec<Link>> {
    let pattern = format!("%{}%", escape_like(text));
    query_links(
        conn,
        &format!(
            "SELECT {} FROM links WHERE title LIKE ? ESCAPE '\\' ORDER BY created DESC, id DESC",
            links::LINK_COLUMNS
        ),
        params![pattern],
    )
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn query_links<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Link>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, links::read_link_row)?
        .collect::<Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|row| links::hydrate(conn, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::open_in_memory;

    fn add(conn: &Connection, title: &str, created: i64, tag_names: &[&str]) -> i64 {
        let link = Link::with_title(format!("http://example.com/{}", created), title);
        let id = links::insert_link(conn, &link, created).unwrap();
        let names: Vec<String> = tag_names.iter().map(|t| t.to_string()).collect();
        links::replace_tags(conn, id, &names).unwrap();
        id
    }

    #[test]
    fn test_latest_orders_and_limits() {
        let conn = open_in_memory().unwrap();
        add(&conn, "old", 10, &[]);
        add(&conn, "new", 30, &[]);
        add(&conn, "mid", 20, &[]);

        let links = latest(&conn, 2).unwrap();
        let titles: Vec<_> = links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid"]);

        assert!(latest(&conn, 0).unwrap().is_empty());
    }

    #[test]
    fn test_latest_ties_break_on_id() {
        let conn = open_in_memory().unwrap();
        let first = add(&conn, "first", 5, &[]);
        let second = add(&conn, "second", 5, &[]);

        let ids: Vec<_> = latest(&conn, 10).unwrap().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![Some(second), Some(first)]);
    }

    #[test]
    fn test_by_tag() {
        let conn = open_in_memory().unwrap();
        add(&conn, "a", 1, &["rust"]);
        add(&conn, "b", 2, &["rust", "web"]);
        add(&conn, "c", 3, &["web"]);

        let rust: Vec<_> = by_tag(&conn, "rust").unwrap();
        let titles: Vec<_> = rust.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a"]);
        assert_eq!(rust[0].tags, vec!["rust", "web"]);

        assert!(by_tag(&conn, "nonexistent").unwrap().is_empty());
    }

    #[test]
    fn test_search_case_insensitive() {
        let conn = open_in_memory().unwrap();
        add(&conn, "Foobar", 1, &[]);
        add(&conn, "xfooy", 2, &[]);
        add(&conn, "bar", 3, &[]);

        let titles: Vec<_> = search(&conn, "FOO")
            .unwrap()
            .into_iter()
            .map(|l| l.title)
            .collect();
        assert_eq!(titles, vec!["xfooy", "Foobar"]);
    }

    #[test]
    fn test_search_wildcards_are_literal() {
        let conn = open_in_memory().unwrap();
        add(&conn, "100% rust", 1, &[]);
        add(&conn, "1000 rust", 2, &[]);
        add(&conn, "snake_case", 3, &[]);
        add(&conn, "snakecase", 4, &[]);

        assert_eq!(search(&conn, "100%").unwrap().len(), 1);
        assert_eq!(search(&conn, "e_c").unwrap().len(), 1);
        assert_eq!(search(&conn, "").unwrap().len(), 4);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("a%b_c\\d"), "a\\%b\\_c\\\\d");
        assert_eq!(escape_like("plain"), "plain");
    }
}
