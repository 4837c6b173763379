//! Tag command handlers

use anyhow::Result;

use modtasty_core::Store;

use crate::output::Output;

/// List all tags with usage counts
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let (names, counts) = store.list_with_counts()?;
    output.print_tags(&names, &counts);
    Ok(())
}
