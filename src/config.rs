//! Configuration management
//!
//! Settings come from a TOML file (by default
//! `<config dir>/company-typeahead/config.toml`). A missing file means
//! defaults; every field is optional inside the file.
//!
//! Precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. `COMPANY_TYPEAHEAD_LOG` for the log filter
//! 3. Configuration file
//! 4. Default values

use crate::error::{Result, TypeaheadError};
use crate::typeahead::TypeaheadConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub typeahead: TypeaheadSettings,

    #[serde(default)]
    pub directory: DirectorySettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input behaviour and display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeaheadSettings {
    /// Offer the manual-entry escape hatch
    #[serde(default)]
    pub allow_free_text: bool,

    #[serde(default = "default_label")]
    pub label: String,

    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    #[serde(default)]
    pub help: Option<String>,

    #[serde(default = "default_free_text_placeholder")]
    pub free_text_placeholder: String,

    #[serde(default = "default_free_text_help")]
    pub free_text_help: String,

    #[serde(default = "default_manual_entry_label")]
    pub manual_entry_label: String,

    #[serde(default = "default_back_to_search_label")]
    pub back_to_search_label: String,
}

/// Where the company list comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySettings {
    /// JSON file; the builtin dataset is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Log file; next to the executable when unset
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn default_label() -> String {
    "Company".to_string()
}

fn default_placeholder() -> String {
    "Search company name".to_string()
}

fn default_free_text_placeholder() -> String {
    "Type the company name".to_string()
}

fn default_free_text_help() -> String {
    "Manual entry: any company name is accepted".to_string()
}

fn default_manual_entry_label() -> String {
    "Not listed? Enter it manually".to_string()
}

fn default_back_to_search_label() -> String {
    "Back to search".to_string()
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

impl Default for TypeaheadSettings {
    fn default() -> Self {
        Self {
            allow_free_text: false,
            label: default_label(),
            placeholder: default_placeholder(),
            help: None,
            free_text_placeholder: default_free_text_placeholder(),
            free_text_help: default_free_text_help(),
            manual_entry_label: default_manual_entry_label(),
            back_to_search_label: default_back_to_search_label(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TypeaheadError::ReadError(path.to_path_buf(), e))?;
        Ok(toml::from_str(&text)?)
    }

    /// Load from `path`, or the default location. Only an explicitly given
    /// file has to exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Self::default_path();
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("company-typeahead")
            .join("config.toml")
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TypeaheadError::WriteError(parent.to_path_buf(), e))?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|e| TypeaheadError::WriteError(path.to_path_buf(), e))
    }

    /// Controller settings; `allow_free_text` overrides the file when set
    pub fn typeahead_config(&self, allow_free_text: Option<bool>) -> TypeaheadConfig {
        let t = &self.typeahead;
        TypeaheadConfig {
            allow_free_text: allow_free_text.unwrap_or(t.allow_free_text),
            placeholder: Some(t.placeholder.clone()),
            label: Some(t.label.clone()),
            help: t.help.clone(),
            error: None,
            free_text_placeholder: Some(t.free_text_placeholder.clone()),
            free_text_help: Some(t.free_text_help.clone()),
            manual_entry_label: t.manual_entry_label.clone(),
            back_to_search_label: t.back_to_search_label.clone(),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing level filter directive
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.typeahead.allow_free_text);
        assert_eq!(config.typeahead.label, "Company");
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.directory.path.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [typeahead]
            allow_free_text = true
            placeholder = "Your employer"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert!(config.typeahead.allow_free_text);
        assert_eq!(config.typeahead.placeholder, "Your employer");
        assert_eq!(config.typeahead.back_to_search_label, "Back to search");
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.typeahead.allow_free_text = true;
        config.directory.path = Some(PathBuf::from("/data/companies.json"));
        config.save(&path).unwrap();

        assert_eq!(Config::load(Some(path.as_path())).unwrap(), config);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(matches!(err, TypeaheadError::ReadError(..)));
    }

    #[test]
    fn bad_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[typeahead\nallow_free_text = 1").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, TypeaheadError::ConfigParse(_)));
    }

    #[test]
    fn cli_override_wins() {
        let config = Config::default();
        assert!(config.typeahead_config(Some(true)).allow_free_text);
        assert!(!config.typeahead_config(None).allow_free_text);
        assert_eq!(config.typeahead_config(None).label.as_deref(), Some("Company"));
    }
}
