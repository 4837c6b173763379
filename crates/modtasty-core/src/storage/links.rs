//! Link rows and their tag associations
//!
//! These helpers are the building blocks of `Store::save` and
//! `Store::delete_by_id`. They do not open transactions themselves; the
//! caller passes a transaction when several of them must apply together.

use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use crate::models::{Link, LinkRow};
use crate::storage::tags;

/// Column list matching [`read_link_row`]
pub const LINK_COLUMNS: &str = "id, title, url, created";

/// Map a `SELECT id, title, url, created` row
pub fn read_link_row(row: &Row<'_>) -> Result<LinkRow> {
    Ok(LinkRow {
        id: row.get(0)?,
        title: row.get(1)?,
        url: row.get(2)?,
        created: row.get(3)?,
    })
}

/// Insert a new link row, returning the generated id
pub fn insert_link(conn: &Connection, link: &Link, created: i64) -> Result<i64> {
    conn.execute(
        "INSERT INTO links (title, url, created) VALUES (?, ?, ?)",
        params![link.title, link.url, created],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update title and url of an existing row; `created` is never touched
///
/// Returns the number of rows changed (0 when the id does not exist).
pub fn update_link(conn: &Connection, id: i64, link: &Link) -> Result<usize> {
    conn.execute(
        "UPDATE links SET title = ?, url = ? WHERE id = ?",
        params![link.title, link.url, id],
    )
}

/// Stored creation time of a link
pub fn created_for(conn: &Connection, id: i64) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT created FROM links WHERE id = ?",
        params![id],
        |row| row.get(0),
    )
    .optional()
}

/// Fetch a raw link row by id
pub fn link_row_by_id(conn: &Connection, id: i64) -> Result<Option<LinkRow>> {
    conn.query_row(
        &format!("SELECT {} FROM links WHERE id = ?", LINK_COLUMNS),
        params![id],
        read_link_row,
    )
    .optional()
}

/// Fetch a raw link row by exact URL (oldest wins on duplicates)
pub fn link_row_by_url(conn: &Connection, url: &str) -> Result<Option<LinkRow>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM links WHERE url = ? ORDER BY id LIMIT 1",
            LINK_COLUMNS
        ),
        params![url],
        read_link_row,
    )
    .optional()
}

/// Replace every association of a link with the given tag names
///
/// Returns the ids of the tags the link carried before, which the caller
/// must garbage-collect once the new set is in place.
pub fn replace_tags(conn: &Connection, link_id: i64, names: &[String]) -> Result<Vec<i64>> {
    let previous = tags::tag_ids_for_link(conn, link_id)?;

    conn.execute("DELETE FROM link_tag WHERE link_id = ?", params![link_id])?;

    for name in names {
        let tag_id = tags::resolve_or_create(conn, name)?;
        conn.execute(
            "INSERT OR IGNORE INTO link_tag (link_id, tag_id) VALUES (?, ?)",
            params![link_id, tag_id],
        )?;
    }

    Ok(previous)
}

/// Remove a link row and its associations
///
/// Returns the ids of the tags it carried; empty if the link did not exist.
pub fn delete_link(conn: &Connection, id: i64) -> Result<Vec<i64>> {
    let previous = tags::tag_ids_for_link(conn, id)?;

    // Associations first, the foreign key points at the link row
    conn.execute("DELETE FROM link_tag WHERE link_id = ?", params![id])?;
    conn.execute("DELETE FROM links WHERE id = ?", params![id])?;

    Ok(previous)
}

/// Build a full link from a row, attaching its sorted tag names
pub fn hydrate(conn: &Connection, row: LinkRow) -> Result<Link> {
    let tags = tags::tag_names_for_link(conn, row.id)?;
    let mut link = Link::from(row);
    link.tags = tags;
    Ok(link)
}

/// Number of stored links
pub fn link_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM links", [], |row| row.get(0))
}
