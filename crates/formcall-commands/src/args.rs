//! Keyed command arguments.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CommandError, Result};

/// Arguments passed to a command, keyed by name.
///
/// Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandArgs(Map<String, Value>);

impl CommandArgs {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces an argument.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Gets an argument by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Gets a required string argument.
    ///
    /// # Errors
    /// `MissingArgument` if absent, `InvalidArgument` if not a string.
    pub fn require_str(&self, key: &str) -> Result<&str> {
        match self.0.get(key) {
            None | Some(Value::Null) => Err(CommandError::MissingArgument(key.to_string())),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(CommandError::invalid(
                key,
                format!("expected a string, got {}", other),
            )),
        }
    }

    /// Gets a required array argument.
    ///
    /// # Errors
    /// `MissingArgument` if absent, `InvalidArgument` if not an array.
    pub fn require_array(&self, key: &str) -> Result<&[Value]> {
        match self.0.get(key) {
            None | Some(Value::Null) => Err(CommandError::MissingArgument(key.to_string())),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(CommandError::invalid(
                key,
                format!("expected a list, got {}", other),
            )),
        }
    }

    /// Iterates over the arguments in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no arguments are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses a `key=value` pair as typed on a command line.
    ///
    /// The value is read as JSON when it parses (`[1,2]`, `true`, `"x"`),
    /// otherwise it is kept as a plain string.
    pub fn parse_pair(raw: &str) -> std::result::Result<(String, Value), String> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(format!("missing key in '{}'", raw));
        }

        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        Ok((key.to_string(), value))
    }
}

impl FromIterator<(String, Value)> for CommandArgs {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Text shown for a resolved command value.
///
/// Strings render as-is; everything else renders as its JSON text.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
