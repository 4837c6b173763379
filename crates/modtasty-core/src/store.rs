//! Unified storage interface
//!
//! `Store` is built once per process from the database path. It holds no
//! connection of its own: each operation opens a connection, does its work
//! and drops it before returning. `save` and `delete_by_id` run inside a
//! single transaction so the link row, its associations and tag garbage
//! collection apply together or not at all.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Store::open(&config)?;
//!
//! let mut link = Link::with_title("https://example.com", "Example");
//! link.set_tags(["web"]);
//! store.save(&mut link)?;
//!
//! let latest = store.get_latest(20)?;
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{Connection, TransactionBehavior};
use tracing::{debug, info};

use crate::config::Config;
use crate::models::Link;
use crate::storage::{self, links, queries, tags, StoreError, StoreResult};

/// Link and tag storage backed by a SQLite file
#[derive(Debug, Clone)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    /// Open the store described by the configuration
    pub fn open(config: &Config) -> StoreResult<Self> {
        Self::open_path(config.database_path())
    }

    /// Open the store at a database path, creating the schema if needed
    pub fn open_path(db_path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self {
            db_path: db_path.into(),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Path of the SQLite file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Create the tables if they are missing; a no-op otherwise
    pub fn ensure_schema(&self) -> StoreResult<()> {
        let conn = self.connect()?;
        storage::ensure_schema(&conn)?;
        debug!("Schema ready at {:?}", self.db_path);
        Ok(())
    }

    fn connect(&self) -> StoreResult<Connection> {
        storage::open_connection(&self.db_path)
    }

    // ==================== Link Operations ====================

    /// Insert or update a link and replace its tag set
    ///
    /// A link without an id is inserted and gets its id and creation time
    /// (if unset) assigned. A link with an id updates title and url only;
    /// its stored creation time is kept and copied back into `link`.
    /// Tags the link no longer carries are garbage-collected.
    pub fn save(&self, link: &mut Link) -> StoreResult<Link> {
        if link.url.trim().is_empty() {
            return Err(StoreError::MissingUrl);
        }

        let mut names = link.tags.clone();
        names.retain(|t| !t.is_empty());
        names.sort();
        names.dedup();

        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let (id, created) = match link.id {
            Some(id) => {
                let created = links::created_for(&tx, id)?.ok_or(StoreError::LinkNotFound(id))?;
                links::update_link(&tx, id, link)?;
                (id, created)
            }
            None => {
                let created = link.created.unwrap_or_else(|| Utc::now().timestamp());
                let id = links::insert_link(&tx, link, created)?;
                (id, created)
            }
        };

        let previous = links::replace_tags(&tx, id, &names)?;
        for tag_id in previous {
            tags::garbage_collect(&tx, tag_id)?;
        }

        tx.commit()?;

        if link.id.is_none() {
            info!("Saved new link {} ({})", id, link.url);
        } else {
            debug!("Updated link {} with {} tag(s)", id, names.len());
        }

        link.id = Some(id);
        link.created = Some(created);
        link.tags = names;
        Ok(link.clone())
    }

    /// Get a link by id
    pub fn get_by_id(&self, id: i64) -> StoreResult<Option<Link>> {
        let conn = self.connect()?;
        match links::link_row_by_id(&conn, id)? {
            Some(row) => Ok(Some(links::hydrate(&conn, row)?)),
            None => Ok(None),
        }
    }

    /// Get a link by its exact URL (duplicate check before insert)
    pub fn get_by_url(&self, url: &str) -> StoreResult<Option<Link>> {
        let conn = self.connect()?;
        match links::link_row_by_url(&conn, url)? {
            Some(row) => Ok(Some(links::hydrate(&conn, row)?)),
            None => Ok(None),
        }
    }

    /// Delete a link and garbage-collect the tags it leaves orphaned
    ///
    /// Deleting an id that does not exist does nothing.
    pub fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let previous = links::delete_link(&tx, id)?;
        let mut collected = 0;
        for tag_id in previous {
            if tags::garbage_collect(&tx, tag_id)? {
                collected += 1;
            }
        }

        tx.commit()?;
        info!("Deleted link {} ({} tag(s) collected)", id, collected);
        Ok(())
    }

    /// The most recently created links, newest first
    pub fn get_latest(&self, limit: usize) -> StoreResult<Vec<Link>> {
        let conn = self.connect()?;
        Ok(queries::latest(&conn, limit)?)
    }

    /// Links carrying a tag, newest first; empty for unknown tags
    pub fn get_by_tag(&self, tag_name: &str) -> StoreResult<Vec<Link>> {
        let conn = self.connect()?;
        Ok(queries::by_tag(&conn, tag_name)?)
    }

    /// Links whose title contains `text` (case-insensitive), newest first
    pub fn search(&self, text: &str) -> StoreResult<Vec<Link>> {
        let conn = self.connect()?;
        Ok(queries::search(&conn, text)?)
    }

    /// Number of stored links
    pub fn link_count(&self) -> StoreResult<i64> {
        let conn = self.connect()?;
        Ok(links::link_count(&conn)?)
    }

    // ==================== Tag Operations ====================

    /// All tags and their link counts as parallel lists, most used first
    pub fn list_with_counts(&self) -> StoreResult<(Vec<String>, Vec<i64>)> {
        let conn = self.connect()?;
        Ok(tags::list_with_counts(&conn)?.into_iter().unzip())
    }

    /// Number of tag rows
    pub fn tag_count(&self) -> StoreResult<i64> {
        let conn = self.connect()?;
        Ok(tags::tag_count(&conn)?)
    }
}
