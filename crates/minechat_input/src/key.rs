//! Key binding identifiers.
//!
//! The game stores bindings as `key.keyboard.<name>` (for example
//! `key.keyboard.t` or `key.keyboard.left.shift`). A [`KeyBinding`] holds the
//! `<name>` part, which is what input backends understand.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, InputResult};

const KEYBOARD_PREFIX: &str = "key.keyboard.";
const MOUSE_PREFIX: &str = "key.mouse.";
const UNBOUND: &str = "unknown";

/// A keyboard key that can be pressed by an input backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyBinding {
    name: String,
}

impl KeyBinding {
    /// Parse a game identifier (`key.keyboard.t`) or a bare key name (`t`).
    pub fn parse(raw: &str) -> InputResult<Self> {
        if raw.starts_with(MOUSE_PREFIX) {
            return Err(InputError::UnsupportedBinding(raw.to_string()));
        }

        let name = match raw.strip_prefix(KEYBOARD_PREFIX) {
            Some(name) => name,
            None if raw.starts_with("key.") => {
                return Err(InputError::InvalidBinding(raw.to_string()))
            }
            None => raw,
        };

        if name == UNBOUND {
            return Err(InputError::UnsupportedBinding(raw.to_string()));
        }
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(InputError::InvalidBinding(raw.to_string()));
        }

        Ok(Self {
            name: name.to_lowercase(),
        })
    }

    /// The escape key, used to dismiss the chat console.
    pub fn escape() -> Self {
        Self {
            name: "escape".to_string(),
        }
    }

    /// The enter key, used to submit the chat line.
    pub fn enter() -> Self {
        Self {
            name: "enter".to_string(),
        }
    }

    /// Key name without the `key.keyboard.` prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier in the game's settings format.
    pub fn identifier(&self) -> String {
        format!("{}{}", KEYBOARD_PREFIX, self.name)
    }

    /// The single character this key types, if it is a printable key.
    pub fn as_char(&self) -> Option<char> {
        let mut chars = self.name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(c);
        }
        let c = match self.name.as_str() {
            "slash" => '/',
            "period" => '.',
            "comma" => ',',
            "minus" => '-',
            "equal" => '=',
            "semicolon" => ';',
            "apostrophe" => '\'',
            "backslash" => '\\',
            "grave.accent" => '`',
            "left.bracket" => '[',
            "right.bracket" => ']',
            "space" => ' ',
            _ => return None,
        };
        Some(c)
    }
}

impl std::fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl std::str::FromStr for KeyBinding {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for KeyBinding {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<KeyBinding> for String {
    fn from(key: KeyBinding) -> Self {
        key.name
    }
}
