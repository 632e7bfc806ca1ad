use std::collections::BTreeMap;

use serde::Serialize;

/// Key/value pairs from a SKILL.md front-matter block.
///
/// All values are plain strings; no nesting and no type coercion. A key that
/// appears twice keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    /// Create an empty metadata map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Look up a value, falling back to `default` when the key is unset.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// The skill name, or `default` when absent.
    #[must_use]
    pub fn name<'a>(&'a self, default: &'a str) -> &'a str {
        self.get_or("name", default)
    }

    /// The skill description, or `default` when absent.
    #[must_use]
    pub fn description<'a>(&'a self, default: &'a str) -> &'a str {
        self.get_or("description", default)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A named placeholder inferred from a command template.
///
/// Templates carry no type annotations, so every parameter is an opaque,
/// required string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
    pub description: String,
}

impl Parameter {
    /// Build a parameter with the default string/required metadata.
    #[must_use]
    pub fn string(name: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type: "string".to_string(),
            required: true,
            description: format!("Parameter: {name}"),
        }
    }
}

/// A resolved, uniquely named tool built from one command template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub command: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
}

impl ToolSpec {
    /// Returns `true` if the wrapper takes no arguments.
    #[must_use]
    pub fn is_nullary(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Coarse execution profile of a skill, derived from its first command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillPattern {
    /// Always `"command_execution"` for shell-backed skills.
    #[serde(rename = "type")]
    pub kind: String,
    /// First token of the first command, if any command exists.
    pub primary_tool: Option<String>,
    /// Whether the first command takes placeholders or shell variables.
    pub requires_input: bool,
    pub output_format: String,
}
