//! Status command handler

use anyhow::Result;

use modtasty_core::{Config, Operation, Store};

use crate::output::{Output, OutputFormat};

/// Show database location, counts and access policy
pub fn show(store: &Store, config: &Config, output: &Output) -> Result<()> {
    let links = store.link_count()?;
    let tags = store.tag_count()?;
    let policy = config.access_policy();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "database": store.path(),
                    "counts": {
                        "links": links,
                        "tags": tags
                    },
                    "public": {
                        "read": policy.is_public(Operation::Read),
                        "write": policy.is_public(Operation::Write),
                        "feed": policy.is_public(Operation::Feed)
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", links);
        }
        OutputFormat::Human => {
            let access = |op| {
                if policy.is_public(op) {
                    "public"
                } else {
                    "login required"
                }
            };
            println!("modtasty Status");
            println!("===============");
            println!();
            println!("Storage:");
            println!("  Database: {}", store.path().display());
            println!();
            println!("Access:");
            println!("  Read:  {}", access(Operation::Read));
            println!("  Write: {}", access(Operation::Write));
            println!("  Feed:  {}", access(Operation::Feed));
            println!();
            println!("Contents:");
            println!("  Links: {}", links);
            println!("  Tags:  {}", tags);
        }
    }

    Ok(())
}
