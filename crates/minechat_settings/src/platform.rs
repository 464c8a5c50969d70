//! Platform-specific location of the game's data directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// Operating system families with a known data directory layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Windows,
    #[serde(rename = "macos")]
    MacOs,
    /// Linux and other Unix-likes that follow the `~/.name` convention.
    Linux,
}

impl PlatformFamily {
    /// All recognized families.
    pub const ALL: [PlatformFamily; 3] = [Self::Windows, Self::MacOs, Self::Linux];

    /// Map an OS name (as in `std::env::consts::OS`) to a family.
    pub fn from_os(os: &str) -> SettingsResult<Self> {
        match os.to_lowercase().as_str() {
            "windows" => Ok(Self::Windows),
            "macos" => Ok(Self::MacOs),
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Ok(Self::Linux),
            other => Err(SettingsError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// The family of the running host.
    pub fn current() -> SettingsResult<Self> {
        Self::from_os(std::env::consts::OS)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
        }
    }

    /// Base path segments below the home directory.
    fn base_segments(&self) -> &'static [&'static str] {
        match self {
            Self::Windows => &["AppData", "Roaming"],
            Self::MacOs => &["Library", "Application Support"],
            Self::Linux => &[],
        }
    }

    /// Name of the game's data directory for this family.
    pub fn data_dir_name(&self) -> &'static str {
        match self {
            Self::MacOs => "minecraft",
            Self::Windows | Self::Linux => ".minecraft",
        }
    }

    /// Game root below the given home directory.
    pub fn root_under(&self, home: &Path) -> PathBuf {
        let mut root = home.to_path_buf();
        for segment in self.base_segments() {
            root.push(segment);
        }
        root.push(self.data_dir_name());
        root
    }
}

impl std::fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PlatformFamily {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_os(s)
    }
}

/// Resolve the default game root for a platform family.
pub fn resolve_platform_root(family: PlatformFamily) -> SettingsResult<PathBuf> {
    let home = dirs::home_dir().ok_or(SettingsError::HomeDirUnavailable)?;
    let root = family.root_under(&home);
    debug!("Resolved {} game root: {:?}", family, root);
    Ok(root)
}
