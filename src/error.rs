//! Error types for company-typeahead
//!
//! The typeahead controller itself never fails; these errors cover the
//! integration boundary: loading the company directory, reading the
//! configuration file and driving the terminal/desktop hosts.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for company-typeahead operations
#[derive(Error, Debug)]
pub enum TypeaheadError {
    #[error("Failed to read '{0}': {1}")]
    ReadError(PathBuf, std::io::Error),

    #[error("Failed to write '{0}': {1}")]
    WriteError(PathBuf, std::io::Error),

    #[error("Malformed company directory: {0}")]
    DirectoryFormat(#[from] serde_json::Error),

    #[error("Duplicate company id '{0}'")]
    DuplicateId(String),

    #[error("Company '{0}' has a blank name")]
    BlankName(String),

    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Logging setup failed: {0}")]
    LoggingError(String),

    #[error("GUI error: {0}")]
    GuiError(String),
}

/// Result type alias for company-typeahead operations
pub type Result<T> = std::result::Result<T, TypeaheadError>;

impl TypeaheadError {
    /// Check if this error comes from bad directory data (as opposed to I/O)
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            TypeaheadError::DirectoryFormat(_)
                | TypeaheadError::DuplicateId(_)
                | TypeaheadError::BlankName(_)
        )
    }
}
