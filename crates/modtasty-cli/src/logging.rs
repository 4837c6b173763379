//! Tracing setup
//!
//! Logs go to the configured log file, or to stderr when none is set.
//! `RUST_LOG` overrides the configured level.

use std::fs::OpenOptions;
use std::sync::Mutex;

use modtasty_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber (ignored if one is already set)
pub fn init(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(default_directives(&config.log_level))
    });

    let Some(log_path) = config.log_file.as_ref() else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    };

    let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();

    info!("Logging to {:?}", log_path);
}

fn default_directives(level: &str) -> String {
    format!("modtasty_core={},modtasty={}", level, level)
}
