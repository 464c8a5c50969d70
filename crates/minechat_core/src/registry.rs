//! Command registry with alias-aware lookup.

use std::collections::HashMap;

use tracing::debug;

use crate::command::{Command, Parameter, ParameterKind};
use crate::error::{ChatError, ChatResult};

/// The set of commands a session can send.
///
/// Every name and alias maps to exactly one command. Registration never
/// overwrites: a colliding name rejects the whole command.
#[derive(Default, Clone)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-filled with [`vanilla_commands`].
    pub fn vanilla() -> ChatResult<Self> {
        let mut registry = Self::new();
        for command in vanilla_commands()? {
            registry.register(command)?;
        }
        Ok(registry)
    }

    /// Register a command under its name and all aliases.
    pub fn register(&mut self, command: Command) -> ChatResult<()> {
        if let Some(taken) = command.names().iter().find(|n| self.index.contains_key(*n)) {
            return Err(ChatError::DuplicateName(taken.clone()));
        }

        debug!("Registering command: {}", command.names().join(", "));
        let slot = self.commands.len();
        for name in command.names() {
            self.index.insert(name.clone(), slot);
        }
        self.commands.push(command);
        Ok(())
    }

    /// Resolve a name or alias.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.index.get(name).map(|&slot| &self.commands[slot])
    }

    /// Resolve a name or alias, returning an error if not found.
    pub fn get_required(&self, name: &str) -> ChatResult<&Command> {
        self.get(name)
            .ok_or_else(|| ChatError::UnknownCommand(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Every registered name and alias.
    pub fn names(&self) -> Vec<&str> {
        self.index.keys().map(|s| s.as_str()).collect()
    }

    /// Get the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field(
                "commands",
                &self.commands.iter().map(Command::name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn one_of(values: &[&str]) -> ParameterKind {
    ParameterKind::Enum(values.iter().map(|v| v.to_string()).collect())
}

/// Common server commands.
pub fn vanilla_commands() -> ChatResult<Vec<Command>> {
    use ParameterKind::{Number, Text};
    let target = || ParameterKind::String;

    Ok(vec![
        Command::new(
            ["ban"],
            vec![
                Parameter::required("targets", target()),
                Parameter::optional("reason", Text),
            ],
        )?,
        Command::new(["pardon"], vec![Parameter::required("targets", target())])?,
        Command::new(
            ["kick"],
            vec![
                Parameter::required("targets", target()),
                Parameter::optional("reason", Text),
            ],
        )?,
        Command::new(["say"], vec![Parameter::required("message", Text)])?,
        Command::new(
            ["msg", "tell", "w"],
            vec![
                Parameter::required("targets", target()),
                Parameter::required("message", Text),
            ],
        )?,
        Command::new(
            ["teleport", "tp"],
            vec![
                Parameter::required("targets", target()),
                // A player name, or x y z with optional rotation.
                Parameter::optional("destination", Text),
            ],
        )?,
        Command::new(
            ["gamemode"],
            vec![
                Parameter::required(
                    "gamemode",
                    one_of(&["survival", "creative", "adventure", "spectator"]),
                ),
                Parameter::optional("target", target()),
            ],
        )?,
        Command::new(
            ["time"],
            vec![
                Parameter::required("action", one_of(&["set", "add", "query"])),
                Parameter::optional("value", target()),
            ],
        )?,
        Command::new(
            ["weather"],
            vec![
                Parameter::required("type", one_of(&["clear", "rain", "thunder"])),
                Parameter::optional("duration", Number),
            ],
        )?,
        Command::new(
            ["give"],
            vec![
                Parameter::required("targets", target()),
                Parameter::required("item", target()),
                Parameter::optional("count", Number),
            ],
        )?,
        Command::new(["list"], vec![])?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(names: &[&str]) -> Command {
        Command::new(names.iter().copied(), vec![]).unwrap()
    }

    #[test]
    fn test_registry_resolves_aliases() {
        let mut registry = CommandRegistry::new();
        registry.register(command(&["teleport", "tp"])).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("tp").unwrap().name(), "teleport");
        assert_eq!(registry.get("teleport").unwrap().name(), "teleport");
        assert!(registry.get("tpa").is_none());
        assert!(matches!(
            registry.get_required("tpa"),
            Err(ChatError::UnknownCommand(name)) if name == "tpa"
        ));
    }

    #[test]
    fn test_collision_leaves_registry_unchanged() {
        let mut registry = CommandRegistry::new();
        registry.register(command(&["ban"])).unwrap();

        let err = registry.register(command(&["b", "ban"])).unwrap_err();

        assert!(matches!(err, ChatError::DuplicateName(ref name) if name == "ban"));
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains("b"));
        let mut names = registry.names();
        names.sort();
        assert_eq!(names, vec!["ban"]);
    }

    #[test]
    fn test_vanilla_registry() {
        let registry = CommandRegistry::vanilla().unwrap();
        assert!(registry.contains("ban"));
        assert_eq!(registry.get("w").unwrap().name(), "msg");
        assert_eq!(registry.get("tp").unwrap().name(), "teleport");
        assert!(registry.get("list").unwrap().params().is_empty());
    }

    #[test]
    fn test_vanilla_teleport_to_coordinates() {
        let registry = CommandRegistry::vanilla().unwrap();
        let tp = registry.get("tp").unwrap();

        assert_eq!(
            tp.invocation("/", &["Steve", "100", "64", "100"]).unwrap(),
            "/teleport Steve 100 64 100"
        );
        assert_eq!(tp.invocation("/", &["100", "64", "100"]).unwrap(), "/teleport 100 64 100");
        assert_eq!(tp.invocation("/", &["Steve", "Alex"]).unwrap(), "/teleport Steve Alex");
        assert!(tp.invocation::<&str>("/", &[]).unwrap_err().is_command());
    }

    #[test]
    fn test_vanilla_commands_accept_typical_arguments() {
        let registry = CommandRegistry::vanilla().unwrap();

        assert_eq!(
            registry.get("ban").unwrap().invocation("/", &["PlayerX", "griefing", "spawn"]).unwrap(),
            "/ban PlayerX griefing spawn"
        );
        assert_eq!(registry.get("list").unwrap().invocation::<&str>("/", &[]).unwrap(), "/list");
        assert!(matches!(
            registry.get("pardon").unwrap().invocation("/", &["PlayerX", "extra"]),
            Err(ChatError::TooManyArguments { max: 1, given: 2, .. })
        ));
    }
}
