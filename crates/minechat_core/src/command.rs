//! Command and parameter definitions.
//!
//! A [`Command`] is a canonical name, zero or more aliases, and an ordered
//! list of [`Parameter`]s. Parameter order is the positional order of the
//! arguments in the composed invocation string.

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, ChatResult};

/// Value kind accepted by a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKind {
    /// A single whitespace-free token.
    String,
    /// A decimal number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// One of a fixed set of tokens.
    Enum(Vec<String>),
    /// Free text that takes every remaining argument. Only valid last.
    Text,
}

impl ParameterKind {
    fn tag(&self) -> ParameterTag {
        match self {
            Self::String => ParameterTag::String,
            Self::Number => ParameterTag::Number,
            Self::Boolean => ParameterTag::Boolean,
            Self::Enum(_) => ParameterTag::Enum,
            Self::Text => ParameterTag::Text,
        }
    }

    /// Check a single argument value.
    fn check(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("value must not be empty".to_string());
        }
        match self {
            Self::String => {
                if value.chars().any(char::is_whitespace) {
                    return Err("value must not contain whitespace".to_string());
                }
            }
            Self::Number => {
                if !value.parse::<f64>().is_ok_and(f64::is_finite) {
                    return Err("expected a number".to_string());
                }
            }
            Self::Boolean => {
                if value != "true" && value != "false" {
                    return Err("expected true or false".to_string());
                }
            }
            Self::Enum(values) => {
                if !values.iter().any(|v| v == value) {
                    return Err(format!("expected one of: {}", values.join(", ")));
                }
            }
            Self::Text => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ParameterTag {
    #[default]
    String,
    Number,
    Boolean,
    Enum,
    Text,
}

/// Serialized form of a parameter, as written in client config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParameterDef {
    name: String,
    #[serde(rename = "type", default)]
    kind: ParameterTag,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    values: Vec<String>,
    #[serde(default)]
    required: bool,
}

/// A positional command parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ParameterDef", into = "ParameterDef")]
pub struct Parameter {
    name: String,
    kind: ParameterKind,
    required: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParameterKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
        }
    }

    /// A parameter that must be supplied.
    pub fn required(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self::new(name, kind, true)
    }

    /// A parameter that may be left out.
    pub fn optional(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self::new(name, kind, false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ParameterKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Usage fragment: `<name>` when required, `[name]` otherwise.
    pub fn usage(&self) -> String {
        let label = match &self.kind {
            ParameterKind::Enum(values) => values.join("|"),
            ParameterKind::Text => format!("{}...", self.name),
            _ => self.name.clone(),
        };
        if self.required {
            format!("<{}>", label)
        } else {
            format!("[{}]", label)
        }
    }
}

impl TryFrom<ParameterDef> for Parameter {
    type Error = String;

    fn try_from(def: ParameterDef) -> Result<Self, Self::Error> {
        let kind = match def.kind {
            ParameterTag::String => ParameterKind::String,
            ParameterTag::Number => ParameterKind::Number,
            ParameterTag::Boolean => ParameterKind::Boolean,
            ParameterTag::Text => ParameterKind::Text,
            ParameterTag::Enum if def.values.is_empty() => {
                return Err(format!("enum parameter '{}' has no values", def.name))
            }
            ParameterTag::Enum => ParameterKind::Enum(def.values),
        };
        Ok(Self::new(def.name, kind, def.required))
    }
}

impl From<Parameter> for ParameterDef {
    fn from(param: Parameter) -> Self {
        let kind = param.kind.tag();
        let values = match param.kind {
            ParameterKind::Enum(values) => values,
            _ => Vec::new(),
        };
        Self {
            name: param.name,
            kind,
            values,
            required: param.required,
        }
    }
}

/// Serialized form of a command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CommandDef {
    names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    params: Vec<Parameter>,
}

/// An immutable chat command definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CommandDef", into = "CommandDef")]
pub struct Command {
    names: Vec<String>,
    params: Vec<Parameter>,
}

impl Command {
    /// Build a command from its names (canonical first) and parameters.
    ///
    /// Fails when a name is empty or contains whitespace, a name repeats,
    /// a parameter name repeats, a required parameter follows an optional
    /// one, or a text parameter is not last.
    pub fn new<I, S>(names: I, params: Vec<Parameter>) -> ChatResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        Self::validate(&names, &params).map_err(ChatError::InvalidDefinition)?;
        Ok(Self { names, params })
    }

    fn validate(names: &[String], params: &[Parameter]) -> Result<(), String> {
        if names.is_empty() {
            return Err("command needs at least one name".to_string());
        }
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(format!("invalid command name {:?}", name));
            }
            if names[..i].contains(name) {
                return Err(format!("name '{}' listed twice", name));
            }
        }

        let mut seen_optional = false;
        for (i, param) in params.iter().enumerate() {
            if params[..i].iter().any(|p| p.name == param.name) {
                return Err(format!(
                    "parameter '{}' listed twice in '{}'",
                    param.name, names[0]
                ));
            }
            if param.required && seen_optional {
                return Err(format!(
                    "required parameter '{}' follows an optional one in '{}'",
                    param.name, names[0]
                ));
            }
            if param.kind == ParameterKind::Text && i + 1 != params.len() {
                return Err(format!(
                    "text parameter '{}' must be last in '{}'",
                    param.name, names[0]
                ));
            }
            seen_optional |= !param.required;
        }
        Ok(())
    }

    /// Canonical name.
    pub fn name(&self) -> &str {
        &self.names[0]
    }

    /// Canonical name followed by aliases.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn aliases(&self) -> &[String] {
        &self.names[1..]
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    fn is_greedy(&self) -> bool {
        matches!(self.params.last(), Some(p) if p.kind == ParameterKind::Text)
    }

    /// Usage line, e.g. `/ban <targets> [reason...]`.
    pub fn usage(&self, prefix: &str) -> String {
        let mut usage = format!("{}{}", prefix, self.name());
        for param in &self.params {
            usage.push(' ');
            usage.push_str(&param.usage());
        }
        usage
    }

    /// Check arguments against the parameter list in order.
    pub fn validate_args<S: AsRef<str>>(&self, args: &[S]) -> ChatResult<()> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        for (index, param) in self.params.iter().enumerate() {
            let value = match param.kind {
                ParameterKind::Text if index < args.len() => args[index..].join(" "),
                _ => match args.get(index) {
                    Some(value) => value.to_string(),
                    None if param.required => {
                        return Err(ChatError::MissingArgument {
                            command: self.name().to_string(),
                            parameter: param.name.clone(),
                        })
                    }
                    None => continue,
                },
            };

            param
                .kind
                .check(&value)
                .map_err(|reason| ChatError::InvalidArgument {
                    command: self.name().to_string(),
                    parameter: param.name.clone(),
                    value,
                    reason,
                })?;
        }

        if !self.is_greedy() && args.len() > self.params.len() {
            return Err(ChatError::TooManyArguments {
                command: self.name().to_string(),
                max: self.params.len(),
                given: args.len(),
            });
        }
        Ok(())
    }

    /// Compose `prefix + name + ' ' + args` after validating the arguments.
    pub fn invocation<S: AsRef<str>>(&self, prefix: &str, args: &[S]) -> ChatResult<String> {
        self.validate_args(args)?;

        let mut line = format!("{}{}", prefix, self.name());
        for arg in args {
            line.push(' ');
            line.push_str(arg.as_ref());
        }
        Ok(line)
    }
}

impl TryFrom<CommandDef> for Command {
    type Error = String;

    fn try_from(def: CommandDef) -> Result<Self, Self::Error> {
        Self::validate(&def.names, &def.params)?;
        Ok(Self {
            names: def.names,
            params: def.params,
        })
    }
}

impl From<Command> for CommandDef {
    fn from(command: Command) -> Self {
        Self {
            names: command.names,
            params: command.params,
        }
    }
}
