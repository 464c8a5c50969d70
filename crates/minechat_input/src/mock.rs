//! Mock input simulator for testing.
//!
//! Records every call instead of touching the OS input queue, so tests can
//! assert exactly which keys were pressed and which text was typed.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{InputError, InputResult};
use crate::key::KeyBinding;
use crate::simulator::{InputAction, InputEvent, InputSimulator};

/// Recording input simulator.
///
/// Clones share the same recording, so a test can keep one handle while the
/// code under test owns another.
#[derive(Clone, Default)]
pub struct MockInput {
    /// Captured events for verification.
    events: Arc<RwLock<Vec<InputEvent>>>,
    /// Simulated backend failure.
    simulate_failure: Arc<RwLock<Option<String>>>,
}

impl MockInput {
    /// Create a new mock simulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every subsequent call with the given message.
    pub fn simulate_failure(self, message: impl Into<String>) -> Self {
        *self.simulate_failure.write() = Some(message.into());
        self
    }

    /// Clear all captured events.
    pub fn clear_calls(&self) {
        self.events.write().clear();
    }

    /// Get all captured events.
    pub fn get_calls(&self) -> Vec<InputEvent> {
        self.events.read().clone()
    }

    /// Get all captured actions, without timestamps.
    pub fn actions(&self) -> Vec<InputAction> {
        self.events.read().iter().map(|e| e.action.clone()).collect()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.events.read().len()
    }

    /// Names of pressed keys, in order.
    pub fn pressed_keys(&self) -> Vec<String> {
        self.events
            .read()
            .iter()
            .filter_map(|e| match &e.action {
                InputAction::Press(key) => Some(key.name().to_string()),
                InputAction::Type(_) => None,
            })
            .collect()
    }

    /// Typed strings, in order.
    pub fn typed_text(&self) -> Vec<String> {
        self.events
            .read()
            .iter()
            .filter_map(|e| match &e.action {
                InputAction::Type(text) => Some(text.clone()),
                InputAction::Press(_) => None,
            })
            .collect()
    }

    fn record(&self, action: InputAction) -> InputResult<()> {
        if let Some(msg) = self.simulate_failure.read().clone() {
            return Err(InputError::Backend(msg));
        }
        self.events.write().push(InputEvent::now(action));
        Ok(())
    }
}

impl InputSimulator for MockInput {
    fn name(&self) -> &str {
        "mock"
    }

    fn press_key(&self, key: &KeyBinding) -> InputResult<()> {
        self.record(InputAction::Press(key.clone()))
    }

    fn type_literal(&self, text: &str) -> InputResult<()> {
        self.record(InputAction::Type(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls() {
        let mock = MockInput::new();
        let handle = mock.clone();

        mock.press_key(&KeyBinding::parse("t").unwrap()).unwrap();
        mock.type_literal("hello").unwrap();
        mock.press_key(&KeyBinding::escape()).unwrap();

        assert_eq!(handle.call_count(), 3);
        assert_eq!(handle.pressed_keys(), vec!["t", "escape"]);
        assert_eq!(handle.typed_text(), vec!["hello"]);
        assert_eq!(handle.actions()[1], InputAction::Type("hello".to_string()));
    }

    #[test]
    fn test_mock_simulated_failure_records_nothing() {
        let mock = MockInput::new().simulate_failure("no display");

        let err = mock.type_literal("hi").unwrap_err();

        assert!(matches!(err, InputError::Backend(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_clear_calls() {
        let mock = MockInput::new();
        mock.type_literal("x").unwrap();
        mock.clear_calls();
        assert_eq!(mock.call_count(), 0);
    }
}
