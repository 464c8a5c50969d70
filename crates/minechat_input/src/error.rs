//! Error types for the input module.

use thiserror::Error;

/// Result type alias for input operations.
pub type InputResult<T> = Result<T, InputError>;

/// Errors that can occur while emitting input.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid key binding: {0}")]
    InvalidBinding(String),

    #[error("Key binding cannot be emitted from the keyboard: {0}")]
    UnsupportedBinding(String),

    #[error("Input backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Input backend failed: {0}")]
    Backend(String),
}
