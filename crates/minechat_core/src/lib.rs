//! # minechat_core
//!
//! Chat automation for a running game instance.
//!
//! A [`ClientContext`] represents one game installation. It reads the game's
//! `options.txt`, resolves the chat and command key bindings, and owns a
//! [`ChatSession`] that drives the in-game chat console through an
//! [`InputSimulator`](minechat_input::InputSimulator).
//!
//! ## Key binding resolution
//!
//! Each binding is taken from the first tier that has it:
//!
//! 1. The explicit value in [`ClientConfig::chat`]
//! 2. `key_key.chat` / `key_key.command` in the user's `options.txt`
//! 3. The default settings (a configured file, or the built-in defaults)
//!
//! If no tier has it, construction fails with a configuration error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use minechat_core::{ClientConfig, ClientContext};
//! use minechat_input::DryRunInput;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default().with_vanilla_commands();
//!     let mut client = ClientContext::new(config, Arc::new(DryRunInput))?;
//!
//!     let chat = client.session_mut();
//!     chat.send_and_submit("hello there").await?;
//!     chat.send_command_and_submit("ban", &["PlayerX", "griefing"]).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod command;
pub mod error;
pub mod registry;
pub mod session;

pub use client::{ChatConfig, ClientConfig, ClientContext};
pub use command::{Command, Parameter, ParameterKind};
pub use error::{ChatError, ChatResult};
pub use registry::{vanilla_commands, CommandRegistry};
pub use session::{
    ChatSession, ChatState, KeyBindings, SessionOptions, DEFAULT_COMMAND_PREFIX,
    DEFAULT_SETTLE_DELAY,
};
