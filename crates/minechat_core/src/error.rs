//! Error types for the core module.

use std::path::PathBuf;

use minechat_input::InputError;
use minechat_settings::SettingsError;
use thiserror::Error;

use crate::session::ChatState;

/// Result type alias for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Errors that can occur while building a client or driving its chat.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid client config file {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Cannot {operation} while chat is {current}")]
    InvalidState {
        operation: &'static str,
        current: ChatState,
    },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing required argument <{parameter}> for command '{command}'")]
    MissingArgument { command: String, parameter: String },

    #[error("Invalid value {value:?} for <{parameter}> of command '{command}': {reason}")]
    InvalidArgument {
        command: String,
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("Command '{command}' takes at most {max} arguments, got {given}")]
    TooManyArguments {
        command: String,
        max: usize,
        given: usize,
    },

    #[error("Invalid command definition: {0}")]
    InvalidDefinition(String),

    #[error("Command name '{0}' is already registered")]
    DuplicateName(String),

    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

impl ChatError {
    /// Configuration problems that abort client construction.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Configuration(_) | Self::InvalidConfig { .. } => true,
            Self::Settings(e) => e.is_configuration(),
            _ => false,
        }
    }

    /// Invalid chat state transitions.
    pub fn is_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }

    /// Command resolution or argument validation failures.
    pub fn is_command(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand(_)
                | Self::MissingArgument { .. }
                | Self::InvalidArgument { .. }
                | Self::TooManyArguments { .. }
        )
    }

    /// Name collisions during registration.
    pub fn is_registration(&self) -> bool {
        matches!(self, Self::DuplicateName(_))
    }
}
