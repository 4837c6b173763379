//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use modtasty_core::Config;

use crate::output::{Output, OutputFormat};

/// Keys accepted by `config set`
const KEYS: &str = "data_dir, username, password, public_read, public_write, public_feed, latest_limit, log_level, log_file";

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "username": config.username,
                    "public_read": config.public_read,
                    "public_write": config.public_write,
                    "public_feed": config.public_feed,
                    "latest_limit": config.latest_limit,
                    "log_level": config.log_level,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:     {}", config.data_dir.display());
            println!("  username:     {}", config.username);
            println!("  password:     (hidden)");
            println!("  public_read:  {}", config.public_read);
            println!("  public_write: {}", config.public_write);
            println!("  public_feed:  {}", config.public_feed);
            println!("  latest_limit: {}", config.latest_limit);
            println!("  log_level:    {}", config.log_level);
            println!(
                "  log_file:     {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    let shown = if key == "password" { "(hidden)" } else { value.as_str() };
    output.success(&format!("Set {} = {}", key, shown));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parse_bool = |value: &str| -> Result<bool> {
        value
            .parse()
            .with_context(|| format!("Invalid value for {}. Use 'true' or 'false'.", key))
    };

    match key {
        "data_dir" => config.data_dir = value.into(),
        "username" => config.username = value.to_string(),
        "password" => config.password = value.to_string(),
        "public_read" => config.public_read = parse_bool(value)?,
        "public_write" => config.public_write = parse_bool(value)?,
        "public_feed" => config.public_feed = parse_bool(value)?,
        "latest_limit" => {
            config.latest_limit = value
                .parse()
                .context("Invalid value for latest_limit. Use a positive number.")?;
        }
        "log_level" => config.log_level = value.to_string(),
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\nValid keys: {}",
                key,
                KEYS
            );
        }
    }
    Ok(())
}
