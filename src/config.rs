//! Converter configuration.
//!
//! Every knob has a default, so an empty YAML document (or no file at all)
//! yields the stock behavior. Example:
//!
//! ```yaml
//! default_name: unknown
//! shell_tags: [bash, sh]
//! dedup: exact-command
//! max_tools: 5
//! command_shapes:
//!   gh: subcommand
//!   kubectl: subcommand
//!   curl: simple
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::errors::{ConvertError, Result};

/// CLIs that take a resource/subcommand and an action as their next tokens.
const SUBCOMMAND_CLIS: &[&str] = &["gh", "aws", "az", "gcloud", "docker"];

/// How a primary command token structures its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandShape {
    /// One tool per primary command (`curl`, `jq`, ...).
    Simple,
    /// `primary subcommand action ...` (`gh issue list`, `aws s3 ls`, ...).
    Subcommand,
}

/// Lookup table from primary command token to its [`CommandShape`].
///
/// Tokens missing from the table are treated as [`CommandShape::Simple`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandShapes(BTreeMap<String, CommandShape>);

impl CommandShapes {
    /// An empty table: every command is simple.
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Set the shape of a primary command, replacing any previous entry.
    #[must_use]
    pub fn with(mut self, primary: &str, shape: CommandShape) -> Self {
        self.0.insert(primary.to_string(), shape);
        self
    }

    #[must_use]
    pub fn shape_of(&self, primary: &str) -> CommandShape {
        self.0
            .get(primary)
            .copied()
            .unwrap_or(CommandShape::Simple)
    }

    /// Returns `true` if `primary` uses subcommand/action structure.
    #[must_use]
    pub fn has_subcommands(&self, primary: &str) -> bool {
        self.shape_of(primary) == CommandShape::Subcommand
    }

    /// Merge `other` over `self`; entries in `other` win.
    fn merge(&mut self, other: CommandShapes) {
        self.0.extend(other.0);
    }
}

impl Default for CommandShapes {
    fn default() -> Self {
        SUBCOMMAND_CLIS
            .iter()
            .fold(Self::empty(), |t, cli| t.with(cli, CommandShape::Subcommand))
    }
}

/// Identity used to collapse simple (non-subcommand) commands into tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DedupPolicy {
    /// Commands sharing a primary token become one tool (first one wins)
    #[default]
    PrimaryToken,
    /// Every distinct command line becomes its own tool
    ExactCommand,
}

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Skill name used when the front matter has no `name`.
    pub default_name: String,
    /// Skill description used when the front matter has no `description`.
    pub default_description: String,
    /// Fence language tags whose contents are treated as commands.
    pub shell_tags: Vec<String>,
    /// Primary commands to resolve with subcommand/action structure.
    /// Entries are merged over the built-in table.
    pub command_shapes: CommandShapes,
    pub dedup: DedupPolicy,
    /// Maximum number of tools to emit; `None` means unbounded.
    pub max_tools: Option<usize>,
    /// Wrap substituted arguments in `shlex.quote(...)`.
    pub quote_arguments: bool,
    /// Sample question used by the generated `__main__` block.
    pub example_query: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            default_name: "unknown".to_string(),
            default_description: "No description".to_string(),
            shell_tags: vec!["bash".to_string()],
            command_shapes: CommandShapes::default(),
            dedup: DedupPolicy::default(),
            max_tools: None,
            quote_arguments: false,
            example_query: "What can you help me with?".to_string(),
        }
    }
}

impl ConverterConfig {
    /// Parse a configuration from YAML text.
    ///
    /// `command_shapes` entries are layered over the built-in table, so a
    /// file only needs to list the CLIs it adds or overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Config`] if the YAML is malformed or contains
    /// unknown keys.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut parsed: ConverterConfig =
            serde_yaml_ng::from_str(text).map_err(|e| ConvertError::Config {
                message: e.to_string(),
            })?;
        let mut shapes = CommandShapes::default();
        shapes.merge(parsed.command_shapes);
        parsed.command_shapes = shapes;
        Ok(parsed)
    }

    /// Read and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Io`] if the file cannot be read, or
    /// [`ConvertError::Config`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text).map_err(|e| match e {
            ConvertError::Config { message } => ConvertError::Config {
                message: format!("{}: {message}", path.display()),
            },
            other => other,
        })
    }
}
