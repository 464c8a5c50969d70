//! # minechat_settings
//!
//! Reading the game's `options.txt` and locating its data directory.
//!
//! The settings format is one `key:value` pair per line. The first `:` is the
//! separator and nothing is trimmed, quoted, or escaped. Malformed lines are
//! skipped and reported as [`ParseWarning`]s instead of failing the parse.
//!
//! ## Example
//!
//! ```rust,no_run
//! use minechat_settings::{PlatformFamily, Settings, SettingsStore, CHAT_KEY};
//!
//! let root = SettingsStore::resolve_root(None, PlatformFamily::current().unwrap()).unwrap();
//! let outcome = SettingsStore::load(SettingsStore::options_path(&root)).unwrap();
//! for warning in &outcome.warnings {
//!     eprintln!("Warning: {}", warning);
//! }
//!
//! let defaults = Settings::builtin_defaults();
//! let chat = outcome.settings.lookup(CHAT_KEY, Some(&defaults));
//! println!("chat key: {:?}", chat);
//! ```

pub mod error;
pub mod platform;
pub mod settings;
pub mod store;

pub use error::{SettingsError, SettingsResult};
pub use platform::{resolve_platform_root, PlatformFamily};
pub use settings::{
    parse, ParseOutcome, ParseWarning, ParseWarningKind, Settings, CHAT_KEY, COMMAND_KEY,
};
pub use store::{SettingsStore, OPTIONS_FILE};
