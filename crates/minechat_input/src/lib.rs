//! # minechat_input
//!
//! Keyboard input simulation for minechat.
//!
//! Everything that touches the host input queue goes through the
//! [`InputSimulator`] trait, which has two operations: tap a key and type a
//! literal string. There is no feedback channel, so a successful call only
//! means the backend accepted the event.
//!
//! # Backends
//!
//! - **MockInput**: Records calls for tests
//! - **DryRunInput**: Logs calls through `tracing` and emits nothing
//! - **EnigoInput**: Real OS input (requires the `enigo` feature)
//!
//! # Example
//!
//! ```rust
//! use minechat_input::{InputSimulator, KeyBinding, MockInput};
//!
//! let input = MockInput::new();
//! let chat = KeyBinding::parse("key.keyboard.t").unwrap();
//!
//! input.press_key(&chat).unwrap();
//! input.type_literal("hello").unwrap();
//!
//! assert_eq!(input.pressed_keys(), vec!["t"]);
//! assert_eq!(input.typed_text(), vec!["hello"]);
//! ```

pub mod dry_run;
#[cfg(feature = "enigo")]
pub mod enigo_backend;
pub mod error;
pub mod key;
pub mod mock;
pub mod simulator;

pub use dry_run::DryRunInput;
#[cfg(feature = "enigo")]
pub use enigo_backend::EnigoInput;
pub use error::{InputError, InputResult};
pub use key::KeyBinding;
pub use mock::MockInput;
pub use simulator::{InputAction, InputEvent, InputSimulator};
