//! modtasty Core Library
//!
//! This crate provides the persistence core of modtasty, a personal
//! bookmarking service: links, the tags attached to them, and the
//! operations that keep the two consistent.
//!
//! # Architecture
//!
//! - **SQLite**: three tables (`links`, `tags`, `link_tag`) in one file
//! - **Store**: opens a connection per operation; writes are transactional
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::open(&Config::load()?)?;
//!
//! // Add a link
//! let mut link = Link::with_title("https://example.com", "Example");
//! link.set_tags(parse_tag_list("web, examples"));
//! store.save(&mut link)?;
//!
//! // Query links
//! let links = store.get_by_tag("web")?;
//! ```
//!
//! # Modules
//!
//! - `store`: Unified storage interface (main entry point)
//! - `models`: Link and tag value objects, tag normalization
//! - `storage`: Schema, row-level link/tag helpers and queries
//! - `auth`: Credential check and public/private access policy
//! - `config`: Application configuration

pub mod auth;
pub mod config;
pub mod models;
pub mod storage;
pub mod store;

pub use auth::{AccessPolicy, Credentials, Operation};
pub use config::Config;
pub use models::{normalize_tag, parse_tag_list, Link, LinkRow, Tag};
pub use storage::queries::DEFAULT_LATEST_LIMIT;
pub use storage::{StoreError, StoreResult};
pub use store::Store;
