//! Logging setup
//!
//! Installs a `tracing` subscriber that writes to a log file, by default
//! next to the executable. The terminal form owns stdout while it runs, so
//! nothing is ever logged to the console.
//!
//! The level comes from the configuration file unless `COMPANY_TYPEAHEAD_LOG`
//! holds a filter directive (e.g. `company_typeahead=trace`).

use crate::config::LoggingConfig;
use crate::error::{Result, TypeaheadError};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured level
pub const LOG_ENV: &str = "COMPANY_TYPEAHEAD_LOG";

const LOG_FILE_NAME: &str = "company-typeahead.log";

/// Where `init` will write
pub fn log_path(config: &LoggingConfig) -> PathBuf {
    config.file_path.clone().unwrap_or_else(default_log_path)
}

/// Get the log file path (same directory as executable)
fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

fn build_filter(config: &LoggingConfig, env_directive: Option<String>) -> EnvFilter {
    env_directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(config.level.as_directive()))
}

/// Initialize the global subscriber. The file is truncated on every start.
pub fn init(config: &LoggingConfig) -> Result<PathBuf> {
    let path = log_path(config);
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .map_err(|e| TypeaheadError::WriteError(path.clone(), e))?;

    let filter = build_filter(config, std::env::var(LOG_ENV).ok());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| TypeaheadError::LoggingError(e.to_string()))?;

    tracing::info!(version = crate::VERSION, log = %path.display(), "logging initialized");
    Ok(path)
}
