//! Command handlers, one module per command group

pub mod config;
pub mod feed;
pub mod link;
pub mod status;
pub mod tag;
