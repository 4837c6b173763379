//! Tag rows: lookup, creation, usage counts and garbage collection
//!
//! A tag row only lives as long as some link references it. Callers that
//! remove associations must pass the affected tag ids to
//! [`garbage_collect`] afterwards.

use rusqlite::{params, Connection, OptionalExtension, Result};
use tracing::debug;

use crate::models::Tag;

/// Look up a tag by its (already normalized) name
pub fn tag_by_name(conn: &Connection, name: &str) -> Result<Option<Tag>> {
    conn.query_row(
        "SELECT id, name FROM tags WHERE name = ? ORDER BY id LIMIT 1",
        params![name],
        |row| {
            Ok(Tag {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()
}

/// Get or create a tag, returning its ID
pub fn resolve_or_create(conn: &Connection, name: &str) -> Result<i64> {
    if let Some(tag) = tag_by_name(conn, name)? {
        return Ok(tag.id);
    }

    conn.execute("INSERT INTO tags (name) VALUES (?)", params![name])?;
    let id = conn.last_insert_rowid();
    debug!("Created tag {:?} with id {}", name, id);
    Ok(id)
}

/// Delete the tag if no association references it
///
/// Returns true when the row was removed.
pub fn garbage_collect(conn: &Connection, tag_id: i64) -> Result<bool> {
    let removed = conn.execute(
        r#"
        DELETE FROM tags
        WHERE id = ?1
          AND NOT EXISTS (SELECT 1 FROM link_tag WHERE tag_id = ?1)
        "#,
        params![tag_id],
    )?;

    if removed > 0 {
        debug!("Garbage-collected orphaned tag {}", tag_id);
    }
    Ok(removed > 0)
}

/// All referenced tags with their link counts, most used first
pub fn list_with_counts(conn: &Connection) -> Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT t.name, COUNT(lt.link_id) AS count
        FROM tags t
        JOIN link_tag lt ON t.id = lt.tag_id
        GROUP BY t.id
        ORDER BY count DESC, t.name
        "#,
    )?;

    let tags = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<(String, i64)>>>()?;
    Ok(tags)
}

/// Ids of the tags currently attached to a link
pub fn tag_ids_for_link(conn: &Connection, link_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT tag_id FROM link_tag WHERE link_id = ?")?;
    let ids = stmt
        .query_map(params![link_id], |row| row.get(0))?
        .collect::<Result<Vec<i64>>>()?;
    Ok(ids)
}

/// Sorted, unique names of the tags attached to a link
pub fn tag_names_for_link(conn: &Connection, link_id: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT DISTINCT t.name FROM tags t
        JOIN link_tag lt ON t.id = lt.tag_id
        WHERE lt.link_id = ?
        ORDER BY t.name
        "#,
    )?;

    let names = stmt
        .query_map(params![link_id], |row| row.get(0))?
        .collect::<Result<Vec<String>>>()?;
    Ok(names)
}

/// Number of tag rows, referenced or not
pub fn tag_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ensure_schema, open_in_memory};

    fn insert_link(conn: &Connection, url: &str) -> i64 {
        conn.execute(
            "INSERT INTO links (title, url, created) VALUES ('', ?, 0)",
            params![url],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn attach(conn: &Connection, link_id: i64, tag_id: i64) {
        conn.execute(
            "INSERT INTO link_tag (link_id, tag_id) VALUES (?, ?)",
            params![link_id, tag_id],
        )
        .unwrap();
    }

    #[test]
    fn test_resolve_or_create_reuses_rows() {
        let conn = open_in_memory().unwrap();

        let first = resolve_or_create(&conn, "rust").unwrap();
        let second = resolve_or_create(&conn, "rust").unwrap();
        let other = resolve_or_create(&conn, "python").unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(tag_count(&conn).unwrap(), 2);
    }

    #[test]
    fn test_existing_duplicate_names_are_tolerated() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE tags (id INTEGER PRIMARY KEY ASC, name TEXT NOT NULL);
             INSERT INTO tags (name) VALUES ('rust'), ('rust');",
        )
        .unwrap();

        ensure_schema(&conn).unwrap();

        let first = resolve_or_create(&conn, "rust").unwrap();
        assert_eq!(first, 1);
        assert_eq!(resolve_or_create(&conn, "rust").unwrap(), first);
        assert_eq!(tag_count(&conn).unwrap(), 2);
    }

    #[test]
    fn test_tag_by_name_missing() {
        let conn = open_in_memory().unwrap();
        assert!(tag_by_name(&conn, "nothing").unwrap().is_none());
    }

    #[test]
    fn test_garbage_collect_only_orphans() {
        let conn = open_in_memory().unwrap();
        let link = insert_link(&conn, "http://a.com");
        let used = resolve_or_create(&conn, "used").unwrap();
        let orphan = resolve_or_create(&conn, "orphan").unwrap();
        attach(&conn, link, used);

        assert!(!garbage_collect(&conn, used).unwrap());
        assert!(garbage_collect(&conn, orphan).unwrap());
        // Already gone
        assert!(!garbage_collect(&conn, orphan).unwrap());

        assert!(tag_by_name(&conn, "used").unwrap().is_some());
        assert!(tag_by_name(&conn, "orphan").unwrap().is_none());
    }

    #[test]
    fn test_list_with_counts_ordering() {
        let conn = open_in_memory().unwrap();
        let a = insert_link(&conn, "http://a.com");
        let b = insert_link(&conn, "http://b.com");
        let popular = resolve_or_create(&conn, "popular").unwrap();
        let beta = resolve_or_create(&conn, "beta").unwrap();
        let alpha = resolve_or_create(&conn, "alpha").unwrap();
        resolve_or_create(&conn, "unused").unwrap();
        attach(&conn, a, popular);
        attach(&conn, b, popular);
        attach(&conn, a, beta);
        attach(&conn, b, alpha);

        let counts = list_with_counts(&conn).unwrap();
        assert_eq!(
            counts,
            vec![
                ("popular".to_string(), 2),
                ("alpha".to_string(), 1),
                ("beta".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_tag_names_for_link_sorted() {
        let conn = open_in_memory().unwrap();
        let link = insert_link(&conn, "http://a.com");
        for name in ["zeta", "alpha", "mid"] {
            let id = resolve_or_create(&conn, name).unwrap();
            attach(&conn, link, id);
        }

        assert_eq!(
            tag_names_for_link(&conn, link).unwrap(),
            vec!["alpha", "mid", "zeta"]
        );
        assert_eq!(tag_ids_for_link(&conn, link).unwrap().len(), 3);
    }
}
