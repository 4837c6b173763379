//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/modtasty/config.toml)
//! 3. Environment variables (MODTASTY_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::auth::{AccessPolicy, Credentials};
use crate::storage::queries::DEFAULT_LATEST_LIMIT;

/// Environment variable prefix
const ENV_PREFIX: &str = "MODTASTY";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the SQLite database
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Operator username
    #[serde(default = "default_username")]
    pub username: String,

    /// Operator password
    #[serde(default = "default_password")]
    pub password: String,

    /// Whether reading links needs no credentials
    #[serde(default = "default_true")]
    pub public_read: bool,

    /// Whether adding/editing/deleting needs no credentials
    #[serde(default)]
    pub public_write: bool,

    /// Whether the latest-links feed needs no credentials
    #[serde(default = "default_true")]
    pub public_feed: bool,

    /// Number of links shown by default in the latest listing
    #[serde(default = "default_latest_limit")]
    pub latest_limit: usize,

    /// Log level for the tracing filter (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            username: default_username(),
            password: default_password(),
            public_read: true,
            public_write: false,
            public_feed: true,
            latest_limit: DEFAULT_LATEST_LIMIT,
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Some(val) = env_var("DATA_DIR") {
            self.data_dir = PathBuf::from(val);
        }
        if let Some(val) = env_var("USERNAME") {
            self.username = val;
        }
        if let Some(val) = env_var("PASSWORD") {
            self.password = val;
        }
        if let Some(val) = env_var("PUBLIC_READ") {
            self.public_read = parse_bool(&val);
        }
        if let Some(val) = env_var("PUBLIC_WRITE") {
            self.public_write = parse_bool(&val);
        }
        if let Some(val) = env_var("PUBLIC_FEED") {
            self.public_feed = parse_bool(&val);
        }
        if let Some(val) = env_var("LOG_LEVEL") {
            if !val.is_empty() {
                self.log_level = val;
            }
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with MODTASTY_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Some(path) = env_var("CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("modtasty")
            .join("config.toml")
    }

    /// Get the path to the SQLite database
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("modtasty.db")
    }

    /// The operator credentials
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    /// Which operations are open without credentials
    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy {
            public_read: self.public_read,
            public_write: self.public_write,
            public_feed: self.public_feed,
        }
    }
}

fn env_var(suffix: &str) -> Option<String> {
    std::env::var(format!("{}_{}", ENV_PREFIX, suffix)).ok()
}

fn parse_bool(val: &str) -> bool {
    val.eq_ignore_ascii_case("true") || val == "1"
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("modtasty")
}

fn default_username() -> String {
    "modtasty".to_string()
}

fn default_password() -> String {
    "modtasty".to_string()
}

fn default_true() -> bool {
    true
}

fn default_latest_limit() -> usize {
    DEFAULT_LATEST_LIMIT
}

fn default_log_level() -> String {
    "warn".to_string()
}
