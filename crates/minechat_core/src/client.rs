//! Client configuration and the per-instance client context.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use minechat_input::{InputSimulator, KeyBinding};
use minechat_settings::{
    resolve_platform_root, ParseWarning, ParseWarningKind, PlatformFamily, Settings,
    SettingsStore, CHAT_KEY, COMMAND_KEY,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::error::{ChatError, ChatResult};
use crate::registry::{vanilla_commands, CommandRegistry};
use crate::session::{ChatSession, KeyBindings, SessionOptions};

/// Explicit chat settings that take precedence over `options.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatConfig {
    /// Chat-open key, as `key.keyboard.<name>` or a bare key name.
    pub chat_key: Option<String>,
    /// Command-open key.
    pub command_key: Option<String>,
    pub command_prefix: Option<String>,
}

/// Everything needed to build a [`ClientContext`].
///
/// Usually loaded from `minechat.toml`:
///
/// ```toml
/// root = "/home/steve/.minecraft"
/// version = "1.20.4"
/// settle_delay_ms = 150
/// vanilla_commands = true
///
/// [chat]
/// chat_key = "key.keyboard.t"
///
/// [[commands]]
/// names = ["home", "h"]
/// params = [{ name = "name", type = "string" }]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Game data directory. Defaults to the platform location.
    pub root: Option<PathBuf>,
    /// Platform used for the default root. Defaults to the host.
    pub platform: Option<PlatformFamily>,
    /// Game version label, informational only.
    pub version: Option<String>,
    pub chat: ChatConfig,
    /// Settings to use instead of reading `options.txt`.
    pub options: Option<BTreeMap<String, String>>,
    /// Settings file consulted when a key is missing from the user settings.
    /// Defaults to the built-in vanilla defaults.
    pub defaults: Option<PathBuf>,
    /// Wait after opening the console. Written to TOML as whole milliseconds.
    #[serde(
        rename = "settle_delay_ms",
        with = "millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub settle_delay: Option<Duration>,
    /// Register the built-in server command vocabulary.
    pub vanilla_commands: bool,
    pub commands: Vec<Command>,
}

impl ClientConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ChatResult<Self> {
        let path = path.as_ref();
        debug!("Reading client config from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| ChatError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ChatError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_platform(mut self, platform: PlatformFamily) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_chat_key(mut self, key: impl Into<String>) -> Self {
        self.chat.chat_key = Some(key.into());
        self
    }

    pub fn with_command_key(mut self, key: impl Into<String>) -> Self {
        self.chat.command_key = Some(key.into());
        self
    }

    pub fn with_command_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.chat.command_prefix = Some(prefix.into());
        self
    }

    pub fn with_options(mut self, options: BTreeMap<String, String>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_defaults(mut self, path: impl Into<PathBuf>) -> Self {
        self.defaults = Some(path.into());
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = Some(delay);
        self
    }

    pub fn with_vanilla_commands(mut self) -> Self {
        self.vanilla_commands = true;
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// The root this config points at: explicit, or the platform default.
    pub fn resolve_root(&self) -> ChatResult<PathBuf> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        let family = match self.platform {
            Some(family) => family,
            None => PlatformFamily::current()?,
        };
        Ok(resolve_platform_root(family)?)
    }

    fn session_options(&self) -> SessionOptions {
        let mut options = SessionOptions::default();
        if let Some(prefix) = &self.chat.command_prefix {
            options.command_prefix = prefix.clone();
        }
        if let Some(delay) = self.settle_delay {
            options.settle_delay = delay;
        }
        options
    }
}

/// `Option<Duration>` as an integer millisecond count.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(delay: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        delay
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

/// Resolve a binding: explicit value, then user settings, then defaults.
fn resolve_binding(
    explicit: Option<&str>,
    settings: &Settings,
    defaults: &Settings,
    key: &str,
) -> ChatResult<KeyBinding> {
    let raw = explicit
        .or_else(|| settings.lookup(key, Some(defaults)))
        .ok_or_else(|| {
            ChatError::Configuration(format!(
                "no '{}' binding in client config, options.txt, or default settings",
                key
            ))
        })?;

    KeyBinding::parse(raw).map_err(|e| ChatError::Configuration(format!("{}: {}", key, e)))
}

/// One running game instance: its root, settings, chat session, and commands.
#[derive(Debug)]
pub struct ClientContext {
    root: PathBuf,
    version: Option<String>,
    settings: Settings,
    defaults: Settings,
    warnings: Vec<ParseWarning>,
    session: ChatSession,
}

impl ClientContext {
    /// Build a context, reading settings from disk as configured.
    pub fn new(config: ClientConfig, input: Arc<dyn InputSimulator>) -> ChatResult<Self> {
        let root = config.resolve_root()?;

        let (settings, warnings) = match &config.options {
            Some(options) => (
                options
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<Settings>(),
                Vec::new(),
            ),
            None => {
                let outcome = SettingsStore::load(SettingsStore::options_path(&root))?;
                if !outcome.is_clean() {
                    warn!(
                        "options.txt: skipped {} malformed lines, {} duplicate keys overridden",
                        outcome.skipped(),
                        outcome.warnings.len() - outcome.skipped()
                    );
                }
                (outcome.settings, outcome.warnings)
            }
        };

        let defaults = match &config.defaults {
            Some(path) => SettingsStore::load(path)?.settings,
            None => Settings::builtin_defaults(),
        };

        let bindings = KeyBindings {
            chat: resolve_binding(config.chat.chat_key.as_deref(), &settings, &defaults, CHAT_KEY)?,
            command: resolve_binding(
                config.chat.command_key.as_deref(),
                &settings,
                &defaults,
                COMMAND_KEY,
            )?,
        };

        let mut commands = CommandRegistry::new();
        if config.vanilla_commands {
            for command in vanilla_commands()? {
                commands.register(command)?;
            }
        }
        let options = config.session_options();
        for command in config.commands {
            commands.register(command)?;
        }

        info!(
            "Client ready at {:?} (chat: {}, command: {}, {} commands)",
            root,
            bindings.chat,
            bindings.command,
            commands.len()
        );

        Ok(Self {
            root,
            version: config.version,
            settings,
            defaults,
            warnings,
            session: ChatSession::new(input, bindings, options).with_commands(commands),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options_path(&self) -> PathBuf {
        SettingsStore::options_path(&self.root)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// User settings as parsed from `options.txt`.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }

    /// Look up a setting, falling back to the default settings.
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.lookup(key, Some(&self.defaults))
    }

    /// Lines of `options.txt` that were skipped or overridden.
    pub fn parse_warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Malformed lines dropped from `options.txt`. Overridden duplicates are not counted.
    pub fn skipped_lines(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.kind != ParseWarningKind::DuplicateKey)
            .count()
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ChatSession {
        &mut self.session
    }

    pub fn commands(&self) -> &CommandRegistry {
        self.session.commands()
    }

    /// Register a command. Fails if any name or alias is taken.
    pub fn register_command(&mut self, command: Command) -> ChatResult<()> {
        self.session.register_command(command)
    }

    /// Resolve a typed name or alias.
    pub fn resolve_command(&self, name: &str) -> Option<&Command> {
        self.session.commands().get(name)
    }
}
