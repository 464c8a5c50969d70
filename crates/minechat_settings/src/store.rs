//! Reading settings files from a game root.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{SettingsError, SettingsResult};
use crate::platform::{resolve_platform_root, PlatformFamily};
use crate::settings::{parse, ParseOutcome};

/// Name of the settings file inside the game root.
pub const OPTIONS_FILE: &str = "options.txt";

/// Reader for game settings files.
pub struct SettingsStore;

impl SettingsStore {
    /// Read a settings file as text.
    pub fn read(path: impl AsRef<Path>) -> SettingsResult<String> {
        let path = path.as_ref();
        debug!("Reading settings from {:?}", path);

        fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => SettingsError::NotFound(path.to_path_buf()),
            _ => SettingsError::Io {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    /// Read and parse a settings file.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<ParseOutcome> {
        let path = path.as_ref();
        let outcome = parse(&Self::read(path)?);
        debug!(
            "Loaded {} settings from {:?} ({} warnings)",
            outcome.settings.len(),
            path,
            outcome.warnings.len()
        );
        Ok(outcome)
    }

    /// Path of `options.txt` inside a game root.
    pub fn options_path(root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(OPTIONS_FILE)
    }

    /// Pick the explicit root if given, otherwise the platform default.
    pub fn resolve_root(
        explicit: Option<&Path>,
        family: PlatformFamily,
    ) -> SettingsResult<PathBuf> {
        match explicit {
            Some(root) => Ok(root.to_path_buf()),
            None => resolve_platform_root(family),
        }
    }
}
