//! Escaping of text embedded in generated Python source.

use std::fmt::Write as _;

/// Render `s` as a double-quoted Python string literal.
#[must_use]
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Escape text for the inside of a `"""` docstring.
#[must_use]
pub fn docstring_text(s: &str) -> String {
    s.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"")
}

/// Escape text for a `PromptTemplate` body held in a `"""` string.
///
/// Braces are doubled so the framework does not mistake them for template
/// variables.
#[must_use]
pub fn template_text(s: &str) -> String {
    docstring_text(s).replace('{', "{{").replace('}', "}}")
}
