//! SQLite schema for links, tags and their associations
//!
//! The three tables are the on-disk format; `ensure_schema` only ever
//! creates what is missing and never touches existing rows.

use rusqlite::{Connection, Result};

/// Create the tables and indexes if they do not exist yet
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Links table
        CREATE TABLE IF NOT EXISTS links (
            id INTEGER PRIMARY KEY ASC,
            title TEXT,
            url TEXT NOT NULL,
            created INTEGER NOT NULL
        );

        -- Tags table (normalized names)
        CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY ASC,
            name TEXT NOT NULL
        );

        -- Link-tag junction table (many-to-many)
        CREATE TABLE IF NOT EXISTS link_tag (
            link_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (link_id, tag_id),
            FOREIGN KEY (link_id) REFERENCES links(id),
            FOREIGN KEY (tag_id) REFERENCES tags(id)
        );

        -- Duplicate detection on create
        CREATE INDEX IF NOT EXISTS idx_links_url ON links(url);

        -- Latest-first listings
        CREATE INDEX IF NOT EXISTS idx_links_created ON links(created);

        -- Fast tag lookups. Not UNIQUE: older files may hold duplicate names,
        -- and writers resolve tags inside an immediate transaction.
        CREATE INDEX IF NOT EXISTS idx_tags_name ON tags(name);
        CREATE INDEX IF NOT EXISTS idx_link_tag_tag_id ON link_tag(tag_id);
        "#,
    )
}

/// Names of the user tables currently in the database
pub fn table_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>>>()?;
    Ok(names)
}
