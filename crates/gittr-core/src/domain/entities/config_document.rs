//! The self-templating configuration document and its parsed form.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// The raw configuration document as an ordered sequence of lines.
///
/// Line endings are not part of the lines; `trailing_newline` remembers whether
/// the source ended with one so that `to_text` round-trips the file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigDocument {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl ConfigDocument {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            trailing_newline: text.ends_with('\n'),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            trailing_newline: false,
        }
    }

    /// Same document shape with new lines.
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        Self {
            lines,
            trailing_newline: self.trailing_newline,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline && !self.lines.is_empty() {
            text.push('\n');
        }
        text
    }

    /// Parse the document as YAML into a [`ConfigMapping`].
    pub fn parse(&self) -> Result<ConfigMapping, DomainError> {
        ConfigMapping::from_yaml(&self.lines.join("\n"))
    }
}

/// Parsed configuration: a string-keyed mapping of arbitrary YAML values.
///
/// Stored as a JSON object so renderers can consume it without knowing about
/// YAML.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ConfigMapping {
    root: Map<String, Value>,
}

impl ConfigMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document. An empty (or comment-only) document is an empty
    /// mapping; any other non-mapping top level is an error.
    pub fn from_yaml(text: &str) -> Result<Self, DomainError> {
        let blank = text.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#') || line == "---"
        });
        if blank {
            return Ok(Self::new());
        }

        let value: Value = serde_yaml::from_str(text).map_err(|e| DomainError::ConfigParse {
            reason: e.to_string(),
        })?;

        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            Value::Null => Ok(Self::new()),
            other => Err(DomainError::ConfigParse {
                reason: format!("top level must be a mapping, found {}", kind_of(&other)),
            }),
        }
    }

    /// Serialize back to a YAML document.
    pub fn to_yaml(&self) -> Result<String, DomainError> {
        serde_yaml::to_string(&self.root).map_err(|e| DomainError::ConfigParse {
            reason: e.to_string(),
        })
    }

    /// Look up a dotted key (`ght.name`).
    pub fn get(&self, dotted: &str) -> Option<&Value> {
        let mut parts = dotted.split('.');
        let first = parts.next()?;
        let mut current = self.root.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Convenience for string leaves.
    pub fn get_str(&self, dotted: &str) -> Option<&str> {
        self.get(dotted).and_then(Value::as_str)
    }

    /// Insert or replace a dotted key, creating intermediate mappings.
    pub fn insert(&mut self, dotted: &str, value: Value) {
        let mut parts: Vec<&str> = dotted.split('.').collect();
        let Some(leaf) = parts.pop() else {
            return;
        };

        let mut current = &mut self.root;
        for part in parts {
            let slot = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Value::Object(map) = slot else {
                return;
            };
            current = map;
        }
        current.insert(leaf.to_string(), value);
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// The mapping as a JSON object value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
