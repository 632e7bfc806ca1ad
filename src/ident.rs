//! Python identifier helpers shared by tool naming and code generation.

/// Python hard keywords (3.12). Soft keywords such as `match` and `type`
/// are valid identifiers and are not listed.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Modules a generated wrapper body refers to. A parameter with one of
/// these names would shadow the module inside the function.
const BODY_MODULES: &[&str] = &["shlex", "subprocess"];

#[must_use]
pub fn is_keyword(word: &str) -> bool {
    PYTHON_KEYWORDS.contains(&word)
}

/// Turn an arbitrary string into a snake-ish Python identifier.
///
/// Runs of characters that are not letters or digits (underscores
/// included) become a single `_`; leading and trailing separators are
/// dropped. An empty result becomes `"tool"`, a leading digit gets a
/// `tool_` prefix, and a keyword gets a trailing `_`.
#[must_use]
pub fn to_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for c in raw.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    finish(out, "tool")
}

/// Identifier for a placeholder name.
///
/// Placeholder names are already word characters, so only leading digits,
/// keywords and the module names used by the wrapper body need fixing;
/// everything else is kept verbatim.
#[must_use]
pub fn parameter_identifier(name: &str) -> String {
    if BODY_MODULES.contains(&name) {
        return format!("{name}_");
    }
    finish(name.to_string(), "arg")
}

fn finish(ident: String, prefix: &str) -> String {
    if ident.is_empty() {
        return prefix.to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("{prefix}_{ident}");
    }
    if is_keyword(&ident) {
        return format!("{ident}_");
    }
    ident
}
