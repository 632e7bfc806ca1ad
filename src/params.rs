//! Placeholder inference for command templates.
//!
//! Two placeholder syntaxes are recognized and treated as the same thing:
//! `{name}` and `<name>`, where `name` is one or more word characters.
//! Anything that does not fit (empty names, unbalanced brackets, names with
//! hyphens such as `<run-id>`) is left as literal text. A preceding `$` does
//! not change anything: `${x}` holds the placeholder `x` just as `$<x>` does.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Parameter;

/// Regex for both placeholder forms. Group `brace` or `angle` holds the name.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(?P<brace>\w+)\}|<(?P<angle>\w+)>").expect("placeholder regex must compile")
});

/// Surface syntax a placeholder was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// `{name}`
    Brace,
    /// `<name>`
    Angle,
}

/// One piece of a tokenized command template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Placeholder { name: &'a str, syntax: Syntax },
}

/// Split a command into literal text and placeholders, in order.
///
/// Adjacent literal text is merged, so two literals never follow each
/// other. Concatenating every literal and the original spelling of every
/// placeholder reproduces `command`.
#[must_use]
pub fn tokenize(command: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;

    for caps in PLACEHOLDER_RE.captures_iter(command) {
        let Some(whole) = caps.get(0) else { continue };
        let (name, syntax) = match (caps.name("brace"), caps.name("angle")) {
            (Some(m), _) => (m.as_str(), Syntax::Brace),
            (None, Some(m)) => (m.as_str(), Syntax::Angle),
            (None, None) => continue,
        };
        if whole.start() > literal_start {
            segments.push(Segment::Literal(&command[literal_start..whole.start()]));
        }
        segments.push(Segment::Placeholder { name, syntax });
        literal_start = whole.end();
    }

    if literal_start < command.len() {
        segments.push(Segment::Literal(&command[literal_start..]));
    }
    segments
}

/// Distinct placeholder names in order of first occurrence.
#[must_use]
pub fn placeholder_names(command: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for segment in tokenize(command) {
        if let Segment::Placeholder { name, .. } = segment {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Infer the parameters a command template declares.
///
/// A name written as both `{x}` and `<x>` is one parameter. A command with
/// no placeholders yields an empty list.
#[must_use]
pub fn extract_parameters(command: &str) -> Vec<Parameter> {
    placeholder_names(command)
        .into_iter()
        .map(Parameter::string)
        .collect()
}

/// Returns `true` if a command needs caller input: a placeholder or a shell
/// variable reference.
#[must_use]
pub fn requires_input(command: &str) -> bool {
    command.contains('$') || !placeholder_names(command).is_empty()
}
