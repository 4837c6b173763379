//! Storage layer
//!
//! SQLite persistence for links, tags and their associations.
//!
//! ## Tables
//!
//! - `links` - Link records
//! - `tags` - Normalized tag names
//! - `link_tag` - Link-to-tag junction
//!
//! Every function here works on a borrowed connection (or a transaction,
//! which derefs to one). Connection lifetime is owned by [`crate::Store`].

pub mod error;
pub mod links;
pub mod queries;
pub mod schema;
pub mod tags;

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

pub use error::{StoreError, StoreResult};
pub use schema::ensure_schema;

/// How long a connection waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a connection to the database file, creating its directory if needed
///
/// Foreign keys are enabled on every connection so association rows can
/// never point at missing links or tags.
pub fn open_connection(path: &Path) -> StoreResult<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| StoreError::from_io(e, parent.to_path_buf()))?;
    }

    let conn = Connection::open(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    configure(&conn)?;
    Ok(conn)
}

/// Open an in-memory database with the schema applied (for testing)
pub fn open_in_memory() -> StoreResult<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}
