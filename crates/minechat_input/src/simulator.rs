//! Input simulator trait and types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InputResult;
use crate::key::KeyBinding;

/// A single emitted input action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum InputAction {
    /// A key tap (press and release).
    Press(KeyBinding),
    /// Literal text typed as-is.
    Type(String),
}

impl std::fmt::Display for InputAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Press(key) => write!(f, "press {}", key),
            Self::Type(text) => write!(f, "type {:?}", text),
        }
    }
}

/// An input action with the time it was emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputEvent {
    pub timestamp: DateTime<Utc>,
    pub action: InputAction,
}

impl InputEvent {
    pub fn now(action: InputAction) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
        }
    }
}

/// Keyboard input simulator.
///
/// Both operations are fire-and-forget signals into the host input queue.
/// Success means the backend accepted the event, not that the target
/// application received it.
pub trait InputSimulator: Send + Sync {
    /// Backend name used in logs.
    fn name(&self) -> &str;

    /// Tap a key.
    fn press_key(&self, key: &KeyBinding) -> InputResult<()>;

    /// Type a literal string.
    fn type_literal(&self, text: &str) -> InputResult<()>;
}
