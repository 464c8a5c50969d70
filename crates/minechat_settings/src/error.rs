//! Error types for the settings module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors that can occur while locating or reading game settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Unable to determine home directory")]
    HomeDirUnavailable,
}

impl SettingsError {
    /// Whether this error comes from configuration rather than file access.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnsupportedPlatform(_) | Self::HomeDirUnavailable)
    }
}
