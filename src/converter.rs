//! End-to-end conversion: document → analysis → generated program.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::codegen::{self, GeneratedCode};
use crate::config::ConverterConfig;
use crate::errors::Result;
use crate::models::{Metadata, SkillPattern, ToolSpec};
use crate::params::requires_input;
use crate::parser::{extract_commands_tagged, parse_metadata, SkillDocument};
use crate::resolver::resolve_tools;

/// Everything derived from one skill document before code generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Skill name (front matter or configured default).
    pub skill_name: String,
    /// Skill description (front matter or configured default).
    pub description: String,
    pub metadata: Metadata,
    pub commands: Vec<String>,
    pub pattern: SkillPattern,
    pub tools: Vec<ToolSpec>,
}

impl Conversion {
    /// Names of the resolved tools, in resolution order.
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Parse and resolve a skill document's text.
#[must_use]
pub fn analyze(text: &str, config: &ConverterConfig) -> Conversion {
    let metadata = parse_metadata(text);
    let commands = extract_commands_tagged(text, &config.shell_tags);
    let skill_name = metadata.name(&config.default_name).to_string();
    let description = metadata
        .description(&config.default_description)
        .to_string();
    let pattern = identify_pattern(&commands);
    let tools = resolve_tools(&skill_name, &commands, config);

    Conversion {
        skill_name,
        description,
        metadata,
        commands,
        pattern,
        tools,
    }
}

/// Summarize how a skill executes, based on its first command.
#[must_use]
pub fn identify_pattern<S: AsRef<str>>(commands: &[S]) -> SkillPattern {
    let first = commands.first().map(AsRef::as_ref);
    SkillPattern {
        kind: "command_execution".to_string(),
        primary_tool: first
            .and_then(|c| c.split_whitespace().next())
            .map(str::to_string),
        requires_input: first.is_some_and(requires_input),
        output_format: "text".to_string(),
    }
}

/// Convert in-memory SKILL.md text into a generated program.
#[must_use]
pub fn convert_text(text: &str, config: &ConverterConfig) -> GeneratedCode {
    codegen::render(&analyze(text, config), config)
}

/// Load a SKILL.md (file or directory) and convert it.
///
/// # Errors
///
/// Returns an error only if the skill cannot be located or read.
pub fn convert(path: &Path, config: &ConverterConfig) -> Result<GeneratedCode> {
    let document = SkillDocument::load(path)?;
    let code = codegen::generate(&document, config);
    info!(
        path = %document.path.display(),
        tools = code.tool_count(),
        "converted skill"
    );
    Ok(code)
}
