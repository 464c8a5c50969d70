//! CLI command definitions.
//!
//! Each subcommand builds a client context from the global options and then
//! reads settings or drives the chat.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use minechat_core::{ClientConfig, ClientContext};
use minechat_input::{DryRunInput, InputSimulator};

pub mod list;
pub mod root;
pub mod run;
pub mod say;
pub mod settings;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "minechat.toml";

/// minechat - drive the game's chat console from the command line
#[derive(Parser)]
#[command(name = "minechat")]
#[command(version, about = "minechat - drive the game's chat console from the command line")]
#[command(long_about = r#"
minechat types chat messages and commands into a running game by simulating
keyboard input. Key bindings are read from the game's options.txt.

COMMANDS:
  root      → Print the resolved game directory
  settings  → Show parsed options.txt values and problem lines
  say       → Open the chat and type a message
  run       → Open the chat and type a registered command
  commands  → List registered commands

The chat is left open after typing unless --submit is given.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Configuration error
  3 - Chat state or command error
  4 - Input backend error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Client config file (TOML)
    #[arg(short, long, global = true, env = "MINECHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Game directory containing options.txt
    #[arg(short, long, global = true, env = "MINECHAT_ROOT")]
    pub root: Option<PathBuf>,

    /// Wait after opening the chat, in milliseconds
    #[arg(long, global = true)]
    pub settle_ms: Option<u64>,

    /// Register the built-in server commands
    #[arg(long, global = true)]
    pub vanilla: bool,

    /// Log input instead of emitting it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved game directory
    Root(root::RootArgs),

    /// Show parsed settings
    Settings(settings::SettingsArgs),

    /// Open the chat and type a message
    Say(say::SayArgs),

    /// Open the chat and type a registered command
    Run(run::RunArgs),

    /// List registered commands
    Commands(list::ListArgs),
}

impl GlobalArgs {
    /// Load the config file and apply command-line overrides.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(Path::new(DEFAULT_CONFIG_FILE))?,
            None => ClientConfig::default(),
        };

        if let Some(root) = &self.root {
            config.root = Some(root.clone());
        }
        if let Some(ms) = self.settle_ms {
            config = config.with_settle_delay(Duration::from_millis(ms));
        }
        if self.vanilla {
            config.vanilla_commands = true;
        }
        Ok(config)
    }

    /// Build a client that emits input through the selected backend.
    pub fn client(&self) -> Result<ClientContext> {
        let input = input_backend(self.dry_run)?;
        self.client_with(input)
    }

    /// Build a client that never emits input, for read-only commands.
    pub fn read_only_client(&self) -> Result<ClientContext> {
        self.client_with(Arc::new(DryRunInput))
    }

    fn client_with(&self, input: Arc<dyn InputSimulator>) -> Result<ClientContext> {
        let config = self.client_config()?;
        debug!("Using input backend: {}", input.name());
        let client = ClientContext::new(config, input)?;
        Ok(client)
    }
}

fn load_config(path: &Path) -> Result<ClientConfig> {
    ClientConfig::from_file(path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}

#[cfg(feature = "enigo")]
fn input_backend(dry_run: bool) -> Result<Arc<dyn InputSimulator>> {
    if dry_run {
        return Ok(Arc::new(DryRunInput));
    }
    Ok(Arc::new(minechat_input::EnigoInput::new()))
}

#[cfg(not(feature = "enigo"))]
fn input_backend(dry_run: bool) -> Result<Arc<dyn InputSimulator>> {
    if dry_run {
        return Ok(Arc::new(DryRunInput));
    }
    anyhow::bail!("minechat was built without keyboard support; rebuild with --features enigo or pass --dry-run")
}
