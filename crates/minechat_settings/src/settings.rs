//! The flat `key:value` settings format used by the game's `options.txt`.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

/// Key holding the chat-open key binding.
pub const CHAT_KEY: &str = "key_key.chat";

/// Key holding the command-open key binding.
pub const COMMAND_KEY: &str = "key_key.command";

const BUILTIN_DEFAULTS: &str = include_str!("../resources/default.options.txt");

/// Parsed settings mapping.
///
/// Values are kept as raw strings. A missing key is reported as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Settings {
    entries: BTreeMap<String, String>,
}

impl Settings {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings text, discarding warnings.
    pub fn parse(text: &str) -> Self {
        parse(text).settings
    }

    /// The vanilla default settings shipped with the crate.
    pub fn builtin_defaults() -> Self {
        Self::parse(BUILTIN_DEFAULTS)
    }

    /// Get the raw value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Get a value, consulting `fallback` when this mapping lacks the key.
    pub fn lookup<'a>(&'a self, key: &str, fallback: Option<&'a Settings>) -> Option<&'a str> {
        self.get(key)
            .or_else(|| fallback.and_then(|defaults| defaults.get(key)))
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Why a settings line was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseWarningKind {
    /// The line has no `:` separator.
    MissingSeparator,
    /// The line starts with `:`.
    EmptyKey,
    /// The key was already seen; the later value replaced the earlier one.
    DuplicateKey,
}

/// A non-fatal problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// 1-based line number.
    pub line_number: usize,
    pub line: String,
    pub kind: ParseWarningKind,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self.kind {
            ParseWarningKind::MissingSeparator => "missing ':' separator",
            ParseWarningKind::EmptyKey => "empty key",
            ParseWarningKind::DuplicateKey => "duplicate key",
        };
        write!(f, "line {}: {} ({:?})", self.line_number, reason, self.line)
    }
}

/// Result of parsing settings text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    pub settings: Settings,
    pub warnings: Vec<ParseWarning>,
}

impl ParseOutcome {
    /// Number of malformed lines that were skipped.
    pub fn skipped(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.kind != ParseWarningKind::DuplicateKey)
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Parse `key:value` lines.
///
/// The first `:` separates key from value; neither side is trimmed.
/// Malformed lines are skipped and reported in [`ParseOutcome::warnings`].
pub fn parse(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for (index, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }

        let kind = match line.split_once(':') {
            None => Some(ParseWarningKind::MissingSeparator),
            Some(("", _)) => Some(ParseWarningKind::EmptyKey),
            Some((key, value)) => outcome
                .settings
                .insert(key, value)
                .map(|_| ParseWarningKind::DuplicateKey),
        };

        if let Some(kind) = kind {
            let warning = ParseWarning {
                line_number: index + 1,
                line: line.to_string(),
                kind,
            };
            warn!("Settings {}", warning);
            outcome.warnings.push(warning);
        }
    }

    outcome
}
