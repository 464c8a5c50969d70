//! Chat console state machine.
//!
//! The game's chat console is either closed or open, but its real state can
//! never be observed. [`ChatSession`] keeps a believed state and refuses every
//! operation that would only make sense in the other state: a second open
//! key tap, for example, would close the real console and leave the believed
//! state wrong.
//!
//! Operations take `&mut self`, so a session never runs two operations at
//! once. Dropping an [`ChatSession::open`] future during its settle wait does
//! not undo the transition, because the key has already been pressed.

use std::sync::Arc;
use std::time::Duration;

use minechat_input::{InputSimulator, KeyBinding};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::command::Command;
use crate::error::{ChatError, ChatResult};
use crate::registry::CommandRegistry;

/// Default wait after opening the console.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Default command prefix.
pub const DEFAULT_COMMAND_PREFIX: &str = "/";

/// Believed state of the chat console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatState {
    #[default]
    Closed,
    Open,
}

impl std::fmt::Display for ChatState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
        }
    }
}

/// Keys that open the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    /// Opens an empty chat line.
    pub chat: KeyBinding,
    /// Opens the chat line with the command prefix already typed.
    pub command: KeyBinding,
}

/// Timing and key options for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub command_prefix: String,
    /// Wait after an open key before the console is assumed ready.
    pub settle_delay: Duration,
    /// Dismisses the console without sending.
    pub cancel_key: KeyBinding,
    /// Sends the typed line and closes the console.
    pub submit_key: KeyBinding,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            cancel_key: KeyBinding::escape(),
            submit_key: KeyBinding::enter(),
        }
    }
}

impl SessionOptions {
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_command_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = prefix.into();
        self
    }
}

/// Drives the chat console of one game instance.
pub struct ChatSession {
    input: Arc<dyn InputSimulator>,
    bindings: KeyBindings,
    options: SessionOptions,
    commands: CommandRegistry,
    state: ChatState,
}

impl ChatSession {
    pub fn new(input: Arc<dyn InputSimulator>, bindings: KeyBindings, options: SessionOptions) -> Self {
        Self {
            input,
            bindings,
            options,
            commands: CommandRegistry::new(),
            state: ChatState::Closed,
        }
    }

    /// Use an existing command registry.
    pub fn with_commands(mut self, commands: CommandRegistry) -> Self {
        self.commands = commands;
        self
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ChatState::Open
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Add a command to the session's vocabulary.
    pub fn register_command(&mut self, command: Command) -> ChatResult<()> {
        self.commands.register(command)
    }

    fn require(&self, expected: ChatState, operation: &'static str) -> ChatResult<()> {
        if self.state != expected {
            return Err(ChatError::InvalidState {
                operation,
                current: self.state,
            });
        }
        Ok(())
    }

    async fn open_with(&mut self, key: KeyBinding, operation: &'static str) -> ChatResult<()> {
        self.require(ChatState::Closed, operation)?;
        self.input.press_key(&key)?;
        self.state = ChatState::Open;
        info!("Chat opened with {} via {}", key, self.input.name());

        if !self.options.settle_delay.is_zero() {
            tokio::time::sleep(self.options.settle_delay).await;
        }
        Ok(())
    }

    /// Open an empty chat line.
    pub async fn open(&mut self) -> ChatResult<()> {
        let key = self.bindings.chat.clone();
        self.open_with(key, "open chat").await
    }

    /// Open the chat line with the command prefix pre-filled.
    pub async fn open_command(&mut self) -> ChatResult<()> {
        let key = self.bindings.command.clone();
        self.open_with(key, "open command line").await
    }

    /// Dismiss the console without sending.
    pub fn close(&mut self) -> ChatResult<()> {
        self.require(ChatState::Open, "close chat")?;
        self.input.press_key(&self.options.cancel_key)?;
        self.state = ChatState::Closed;
        info!("Chat closed");
        Ok(())
    }

    /// Type text into the open console.
    pub fn type_text(&mut self, message: &str) -> ChatResult<()> {
        self.require(ChatState::Open, "type text")?;
        self.input.type_literal(message)?;
        debug!("Typed {:?}", message);
        Ok(())
    }

    /// Send the typed line; the game closes the console afterwards.
    pub fn submit(&mut self) -> ChatResult<()> {
        self.require(ChatState::Open, "submit chat")?;
        self.input.press_key(&self.options.submit_key)?;
        self.state = ChatState::Closed;
        info!("Chat line submitted");
        Ok(())
    }

    /// Open the console and type a message. The console stays open.
    pub async fn send(&mut self, message: &str) -> ChatResult<()> {
        self.open().await?;
        self.type_text(message)
    }

    /// Open, type, and submit a message.
    pub async fn send_and_submit(&mut self, message: &str) -> ChatResult<()> {
        self.send(message).await?;
        self.submit()
    }

    /// Build the invocation line for a registered command without sending it.
    pub fn compose_command<S: AsRef<str>>(&self, name: &str, args: &[S]) -> ChatResult<String> {
        let command = self.commands.get_required(name)?;
        command.invocation(&self.options.command_prefix, args)
    }

    /// Validate and send a registered command. The console stays open.
    ///
    /// Returns the typed line. Nothing is pressed when validation fails.
    pub async fn send_command<S: AsRef<str>>(&mut self, name: &str, args: &[S]) -> ChatResult<String> {
        let line = self.compose_command(name, args)?;
        self.send(&line).await?;
        Ok(line)
    }

    /// Validate, send, and submit a registered command.
    pub async fn send_command_and_submit<S: AsRef<str>>(
        &mut self,
        name: &str,
        args: &[S],
    ) -> ChatResult<String> {
        let line = self.send_command(name, args).await?;
        self.submit()?;
        Ok(line)
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("input", &self.input.name())
            .field("bindings", &self.bindings)
            .field("state", &self.state)
            .field("commands", &self.commands)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Parameter, ParameterKind};
    use minechat_input::{InputAction, MockInput};

    fn session(mock: &MockInput) -> ChatSession {
        let bindings = KeyBindings {
            chat: KeyBinding::parse("key.keyboard.t").unwrap(),
            command: KeyBinding::parse("key.keyboard.slash").unwrap(),
        };
        let options = SessionOptions::default().with_settle_delay(Duration::ZERO);
        ChatSession::new(Arc::new(mock.clone()), bindings, options)
    }

    #[tokio::test]
    async fn test_open_then_open_again_fails() {
        let mock = MockInput::new();
        let mut chat = session(&mock);
        assert_eq!(chat.state(), ChatState::Closed);

        chat.open().await.unwrap();
        assert_eq!(chat.state(), ChatState::Open);

        let err = chat.open().await.unwrap_err();
        assert!(matches!(
            err,
            ChatError::InvalidState { current: ChatState::Open, .. }
        ));
        assert_eq!(chat.state(), ChatState::Open);
        assert_eq!(mock.pressed_keys(), vec!["t"]);
    }

    #[tokio::test]
    async fn test_open_command_uses_command_key() {
        let mock = MockInput::new();
        let mut chat = session(&mock);

        chat.open_command().await.unwrap();

        assert!(chat.is_open());
        assert_eq!(mock.pressed_keys(), vec!["slash"]);
        assert!(chat.open_command().await.unwrap_err().is_state());
    }

    #[tokio::test]
    async fn test_close_cycle() {
        let mock = MockInput::new();
        let mut chat = session(&mock);

        assert!(chat.close().unwrap_err().is_state());

        chat.open().await.unwrap();
        chat.close().unwrap();
        assert_eq!(chat.state(), ChatState::Closed);

        chat.open().await.unwrap();
        assert_eq!(mock.pressed_keys(), vec!["t", "escape", "t"]);
    }

    #[test]
    fn test_type_text_while_closed_emits_nothing() {
        let mock = MockInput::new();
        let mut chat = session(&mock);

        let err = chat.type_text("hello").unwrap_err();

        assert!(err.is_state());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_send_leaves_chat_open() {
        let mock = MockInput::new();
        let mut chat = session(&mock);

        chat.send("hello world").await.unwrap();

        assert!(chat.is_open());
        assert_eq!(
            mock.actions(),
            vec![
                InputAction::Press(KeyBinding::parse("t").unwrap()),
                InputAction::Type("hello world".to_string()),
            ]
        );
        chat.type_text(" again").unwrap();
        assert_eq!(mock.typed_text(), vec!["hello world", " again"]);
    }

    #[tokio::test]
    async fn test_send_and_submit_closes() {
        let mock = MockInput::new();
        let mut chat = session(&mock);

        chat.send_and_submit("gg").await.unwrap();

        assert_eq!(chat.state(), ChatState::Closed);
        assert_eq!(mock.pressed_keys(), vec!["t", "enter"]);
    }

    #[tokio::test]
    async fn test_send_command_with_prefix() {
        let mock = MockInput::new();
        let mut chat = session(&mock);
        chat.register_command(
            Command::new(
                ["ban", "b"],
                vec![Parameter::required("targets", ParameterKind::String)],
            )
            .unwrap(),
        )
        .unwrap();

        let line = chat.send_command("b", &["PlayerX"]).await.unwrap();

        assert_eq!(line, "/ban PlayerX");
        assert_eq!(mock.typed_text(), vec!["/ban PlayerX"]);
        assert!(chat.is_open());
    }

    #[tokio::test]
    async fn test_failed_command_emits_nothing() {
        let mock = MockInput::new();
        let mut chat = session(&mock);
        chat.register_command(
            Command::new(["kick"], vec![Parameter::required("targets", ParameterKind::String)])
                .unwrap(),
        )
        .unwrap();

        let missing = chat.send_command::<&str>("kick", &[]).await.unwrap_err();
        let unknown = chat.send_command("kik", &["PlayerX"]).await.unwrap_err();

        assert!(matches!(missing, ChatError::MissingArgument { .. }));
        assert!(matches!(unknown, ChatError::UnknownCommand(_)));
        assert_eq!(mock.call_count(), 0);
        assert_eq!(chat.state(), ChatState::Closed);
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_state() {
        let mock = MockInput::new().simulate_failure("no display");
        let mut chat = session(&mock);

        let err = chat.open().await.unwrap_err();

        assert!(matches!(err, ChatError::Input(_)));
        assert_eq!(chat.state(), ChatState::Closed);
    }

    #[tokio::test]
    async fn test_cancelled_settle_keeps_open_state() {
        let mock = MockInput::new();
        let bindings = KeyBindings {
            chat: KeyBinding::parse("t").unwrap(),
            command: KeyBinding::parse("slash").unwrap(),
        };
        let options = SessionOptions::default().with_settle_delay(Duration::from_secs(30));
        let mut chat = ChatSession::new(Arc::new(mock.clone()), bindings, options);

        let cancelled = tokio::time::timeout(Duration::from_millis(10), chat.open()).await;

        assert!(cancelled.is_err());
        assert_eq!(chat.state(), ChatState::Open);
        assert_eq!(mock.pressed_keys(), vec!["t"]);
    }
}
