//! Tool identity: collapse a flat command list into uniquely named tools.
//!
//! Each command is reduced to a [`PatternKey`]. Commands sharing a key are
//! variants of the same operation, so only the first one (in document
//! order) becomes a [`ToolSpec`]; later ones are dropped without error.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::config::{CommandShapes, ConverterConfig, DedupPolicy};
use crate::ident::to_identifier;
use crate::models::ToolSpec;
use crate::params::extract_parameters;

/// Action used when a subcommand CLI invocation has no third token.
pub const DEFAULT_ACTION: &str = "default";

/// Derived identity of a command, used for deduplication and naming.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternKey {
    /// A simple command, identified by its primary token.
    Command(String),
    /// A subcommand CLI call: `primary subcommand action`.
    Subcommand {
        primary: String,
        subcommand: String,
        action: String,
    },
    /// A whole command line (under [`DedupPolicy::ExactCommand`]).
    Exact { primary: String, command: String },
}

impl PatternKey {
    /// Derive the key of a command. Returns `None` for a blank command.
    ///
    /// Subcommand structure wins over the dedup policy: `gh issue list -L 5`
    /// and `gh issue list` are the same tool under either policy.
    #[must_use]
    pub fn derive(command: &str, shapes: &CommandShapes, policy: DedupPolicy) -> Option<Self> {
        let mut tokens = command.split_whitespace();
        let primary = tokens.next()?.to_string();

        if shapes.has_subcommands(&primary) {
            if let Some(subcommand) = tokens.next() {
                let action = tokens.next().unwrap_or(DEFAULT_ACTION);
                return Some(Self::Subcommand {
                    primary,
                    subcommand: subcommand.to_string(),
                    action: action.to_string(),
                });
            }
        }

        Some(match policy {
            DedupPolicy::PrimaryToken => Self::Command(primary),
            DedupPolicy::ExactCommand => Self::Exact {
                primary,
                command: command.trim().to_string(),
            },
        })
    }

    /// Tool name before identifier sanitization: `{skill}_{...}`.
    #[must_use]
    pub fn raw_name(&self, skill_name: &str) -> String {
        match self {
            Self::Command(primary) | Self::Exact { primary, .. } => {
                format!("{skill_name}_{primary}")
            }
            Self::Subcommand {
                subcommand, action, ..
            } => format!("{skill_name}_{subcommand}_{action}"),
        }
    }

    /// Human-readable purpose line for the generated wrapper.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Command(primary) | Self::Exact { primary, .. } => {
                format!("Execute {primary} command")
            }
            Self::Subcommand {
                subcommand, action, ..
            } if action == DEFAULT_ACTION => format!("Execute {subcommand} command"),
            Self::Subcommand {
                subcommand, action, ..
            } => format!("Execute {subcommand} {action} command"),
        }
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(primary) => write!(f, "{primary}"),
            Self::Subcommand {
                primary,
                subcommand,
                action,
            } => write!(f, "{primary} {subcommand} {action}"),
            Self::Exact { command, .. } => write!(f, "{command}"),
        }
    }
}

/// Resolve commands into tools.
///
/// The result preserves first-occurrence order, holds at most one tool per
/// pattern key, and never repeats a name: if sanitizing two different keys
/// produces the same identifier, later ones get `_2`, `_3`, ... suffixes.
/// `config.max_tools`, when set, truncates the result after deduplication.
#[must_use]
pub fn resolve_tools<S: AsRef<str>>(
    skill_name: &str,
    commands: &[S],
    config: &ConverterConfig,
) -> Vec<ToolSpec> {
    let mut seen_keys: HashSet<PatternKey> = HashSet::new();
    let mut used_names: HashSet<String> = HashSet::new();
    let mut tools = Vec::new();

    for command in commands {
        let command = command.as_ref().trim();
        let Some(key) = PatternKey::derive(command, &config.command_shapes, config.dedup) else {
            continue;
        };
        if seen_keys.contains(&key) {
            debug!(%key, command, "dropping duplicate command pattern");
            continue;
        }
        if config.max_tools.is_some_and(|max| tools.len() >= max) {
            debug!(%key, command, "tool limit reached, skipping");
            seen_keys.insert(key);
            continue;
        }

        let name = unique_name(to_identifier(&key.raw_name(skill_name)), &used_names);
        used_names.insert(name.clone());
        tools.push(ToolSpec {
            name,
            command: command.to_string(),
            description: key.describe(),
            parameters: extract_parameters(command),
        });
        seen_keys.insert(key);
    }

    tools
}

fn unique_name(base: String, used: &HashSet<String>) -> String {
    if !used.contains(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !used.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
