//! modtasty CLI
//!
//! Command-line interface for modtasty - personal bookmarks with tags.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use modtasty_core::{Config, Operation, Store, StoreError};

mod commands;
mod logging;
mod output;
mod prompt;
mod title;

use commands::link::LinkEdits;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "modtasty")]
#[command(about = "modtasty - Personal bookmarks with tags")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Username for operations that are not public
    #[arg(short = 'u', long, global = true)]
    username: Option<String>,

    /// Password for operations that are not public
    #[arg(short = 'p', long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bookmark a URL (the page title is fetched automatically)
    Add {
        /// URL to save
        url: String,
        /// Tags to add (repeatable, or comma-separated)
        #[arg(short, long)]
        tag: Vec<String>,
        /// Use this title instead of fetching the page
        #[arg(short = 'T', long)]
        title: Option<String>,
    },
    /// Show link details
    Show {
        /// Link ID
        id: i64,
    },
    /// Edit a link (prompts for values when no flags are given)
    Edit {
        /// Link ID
        id: i64,
        /// New title
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// New URL
        #[arg(long)]
        url: Option<String>,
        /// Replace all tags (comma-separated, empty to clear)
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID
        id: i64,
    },
    /// List the latest links, or the links with a tag
    #[command(alias = "ls")]
    List {
        /// Filter by tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Maximum number of links (defaults to latest_limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// List all tags with link counts
    Tags,
    /// Search link titles
    Search {
        /// Text to look for
        query: String,
    },
    /// Print the latest links as a JSON feed
    Feed {
        /// Maximum number of entries (defaults to latest_limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (database location, counts, access)
    Status,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

impl Commands {
    /// The kind of access this command needs
    fn operation(&self) -> Operation {
        match self {
            Commands::Add { .. } | Commands::Edit { .. } | Commands::Delete { .. } => {
                Operation::Write
            }
            Commands::Feed { .. } => Operation::Feed,
            _ => Operation::Read,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    logging::init(&config);

    require_access(&cli, &config)?;

    let store = match Store::open(&config) {
        Ok(store) => store,
        Err(e) => {
            if let Some(hint) = e.recovery_suggestion() {
                eprintln!("Hint: {}", hint);
            }
            return Err(anyhow::Error::new(e).context(format!(
                "Failed to open database at {:?}",
                config.database_path()
            )));
        }
    };

    let result = match cli.command {
        Commands::Add { url, tag, title } => {
            commands::link::add(&store, url, tag, title, &output).await
        }
        Commands::Show { id } => commands::link::show(&store, id, &output),
        Commands::Edit {
            id,
            title,
            url,
            tags,
        } => commands::link::edit(&store, id, LinkEdits { title, url, tags }, &output),
        Commands::Delete { id } => commands::link::delete(&store, id, &output),
        Commands::List { tag, limit } => {
            commands::link::list(&store, tag, limit.unwrap_or(config.latest_limit), &output)
        }
        Commands::Tags => commands::tag::list(&store, &output),
        Commands::Search { query } => commands::link::search(&store, query, &output),
        Commands::Feed { limit } => {
            commands::feed::show(&store, limit.unwrap_or(config.latest_limit))
        }
        Commands::Status => commands::status::show(&store, &config, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    };

    if let Err(e) = &result {
        if let Some(hint) = recovery_hint(e) {
            eprintln!("Hint: {}", hint);
        }
    }
    result
}

/// Suggestion for store errors the user can fix and retry
fn recovery_hint(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<StoreError>()
        .filter(|e| e.is_recoverable())
        .and_then(StoreError::recovery_suggestion)
}

/// Refuse non-public commands without matching credentials
fn require_access(cli: &Cli, config: &Config) -> Result<()> {
    let op = cli.command.operation();
    let supplied = match (&cli.username, &cli.password) {
        (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
        _ => None,
    };

    if !config
        .access_policy()
        .authorize(op, &config.credentials(), supplied)
    {
        tracing::warn!("Rejected {:?} request", op);
        bail!(
            "Could not verify your access level for this command.\n\
             You have to provide proper credentials with --username and --password."
        );
    }
    Ok(())
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
