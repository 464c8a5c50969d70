//! OS input through the `enigo` crate.

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use tracing::debug;

use crate::error::{InputError, InputResult};
use crate::key::KeyBinding;
use crate::simulator::InputSimulator;

/// Emits real keyboard events into the host input queue.
///
/// A connection is opened per call so the simulator stays `Send + Sync` on
/// every platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnigoInput;

impl EnigoInput {
    pub fn new() -> Self {
        Self
    }

    fn connect(&self) -> InputResult<Enigo> {
        Enigo::new(&Settings::default()).map_err(|e| InputError::BackendUnavailable(e.to_string()))
    }
}

/// Map a game key name to an enigo key.
fn to_enigo_key(key: &KeyBinding) -> InputResult<Key> {
    let mapped = match key.name() {
        "escape" => Key::Escape,
        "enter" | "keypad.enter" => Key::Return,
        "tab" => Key::Tab,
        "space" => Key::Space,
        "backspace" => Key::Backspace,
        "delete" => Key::Delete,
        "home" => Key::Home,
        "end" => Key::End,
        "page.up" => Key::PageUp,
        "page.down" => Key::PageDown,
        "up" => Key::UpArrow,
        "down" => Key::DownArrow,
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,
        "left.shift" | "right.shift" => Key::Shift,
        "left.control" | "right.control" => Key::Control,
        "left.alt" | "right.alt" => Key::Alt,
        "left.win" | "right.win" => Key::Meta,
        "caps.lock" => Key::CapsLock,
        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,
        _ => match key.as_char() {
            Some(c) => Key::Unicode(c),
            None => return Err(InputError::UnsupportedBinding(key.identifier())),
        },
    };
    Ok(mapped)
}

impl InputSimulator for EnigoInput {
    fn name(&self) -> &str {
        "enigo"
    }

    fn press_key(&self, key: &KeyBinding) -> InputResult<()> {
        let mapped = to_enigo_key(key)?;
        debug!("Pressing {} ({:?})", key, mapped);
        self.connect()?
            .key(mapped, Direction::Click)
            .map_err(|e| InputError::Backend(e.to_string()))
    }

    fn type_literal(&self, text: &str) -> InputResult<()> {
        debug!("Typing {} characters", text.chars().count());
        self.connect()?
            .text(text)
            .map_err(|e| InputError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_chat_keys() {
        assert_eq!(to_enigo_key(&KeyBinding::parse("key.keyboard.t").unwrap()).unwrap(), Key::Unicode('t'));
        assert_eq!(to_enigo_key(&KeyBinding::parse("key.keyboard.slash").unwrap()).unwrap(), Key::Unicode('/'));
        assert_eq!(to_enigo_key(&KeyBinding::escape()).unwrap(), Key::Escape);
        assert_eq!(to_enigo_key(&KeyBinding::enter()).unwrap(), Key::Return);
    }

    #[test]
    fn test_unmapped_key_is_rejected() {
        let key = KeyBinding::parse("key.keyboard.print.screen").unwrap();
        assert!(matches!(to_enigo_key(&key), Err(InputError::UnsupportedBinding(_))));
    }
}
