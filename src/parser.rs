//! SKILL.md parsing: front matter and fenced shell commands.
//!
//! Parsing happens in two passes. [`scan`] walks the document line by line
//! and yields typed [`Span`]s (the front-matter block and every fenced code
//! block with its language tag). [`parse_metadata`] and [`extract_commands`]
//! then work on those spans only. Malformed input never fails; missing
//! pieces come back as empty results.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{ConvertError, Result};
use crate::models::Metadata;

/// Front-matter delimiter line.
const DELIMITER: &str = "---";

/// Fence language tag recognized by [`extract_commands`].
pub const DEFAULT_SHELL_TAG: &str = "bash";

/// A skill document loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDocument {
    pub path: PathBuf,
    pub content: String,
}

impl SkillDocument {
    /// Wrap already-loaded text.
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read a skill document. `path` may be a SKILL.md file or a directory
    /// containing one.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::NotFound`] if a directory holds no SKILL.md,
    /// or [`ConvertError::Io`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let file = resolve_skill_path(path)?;
        let content = std::fs::read_to_string(&file)?;
        Ok(Self::from_text(file, content))
    }
}

/// A structural region of a skill document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span<'a> {
    /// Lines between the leading `---` delimiters (delimiters excluded).
    FrontMatter { lines: Vec<&'a str> },
    /// Lines of a closed fenced code block (fences excluded).
    Fence { lang: &'a str, lines: Vec<&'a str> },
}

/// A fence that has been opened but not yet closed.
struct OpenFence<'a> {
    ticks: usize,
    lang: &'a str,
    lines: Vec<&'a str>,
}

/// Split a document into front-matter and fenced-code spans, in order.
///
/// The front matter is only recognized when the very first line is `---`;
/// it ends at the next `---` line. A fence opens on a line of three or more
/// backticks followed by an optional language tag and closes on a line of
/// at least as many backticks. Fence contents are never re-scanned, so a
/// nested fence is ordinary content. A fence still open at end of input is
/// dropped.
#[must_use]
pub fn scan(text: &str) -> Vec<Span<'_>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.lines().collect();
    let mut spans = Vec::new();

    let mut start = 0;
    if let Some(end) = front_matter_end(&lines) {
        spans.push(Span::FrontMatter {
            lines: lines[1..end].to_vec(),
        });
        start = end + 1;
    }

    let mut open: Option<OpenFence<'_>> = None;
    for &line in &lines[start..] {
        if let Some(mut fence) = open.take() {
            if closes_fence(line, fence.ticks) {
                spans.push(Span::Fence {
                    lang: fence.lang,
                    lines: fence.lines,
                });
            } else {
                fence.lines.push(line);
                open = Some(fence);
            }
        } else if let Some((ticks, lang)) = opens_fence(line) {
            open = Some(OpenFence {
                ticks,
                lang,
                lines: Vec::new(),
            });
        }
    }

    if let Some(fence) = open {
        debug!(
            lang = fence.lang,
            lines = fence.lines.len(),
            "discarding unclosed code fence"
        );
    }

    spans
}

/// Index of the closing delimiter, if the document starts with front matter.
fn front_matter_end(lines: &[&str]) -> Option<usize> {
    if lines.first()?.trim_end() != DELIMITER {
        return None;
    }
    lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, l)| l.trim_end() == DELIMITER)
        .map(|(i, _)| i)
}

/// Parse an opening fence line into `(backtick_count, language_tag)`.
fn opens_fence(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start();
    let ticks = trimmed.bytes().take_while(|b| *b == b'`').count();
    if ticks < 3 {
        return None;
    }
    let info = trimmed[ticks..].trim();
    if info.contains('`') {
        return None;
    }
    Some((ticks, info))
}

fn closes_fence(line: &str, ticks: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= ticks && trimmed.bytes().all(|b| b == b'`')
}

/// Extract `key: value` pairs from the leading front-matter block.
///
/// Returns an empty map if the document has no front matter. Lines without
/// a `:` are skipped. Only the first `:` separates key from value, so values
/// such as URLs keep their colons.
#[must_use]
pub fn parse_metadata(text: &str) -> Metadata {
    let mut meta = Metadata::new();
    let Some(Span::FrontMatter { lines }) = scan(text).into_iter().next() else {
        return meta;
    };
    for line in lines {
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            if !key.is_empty() {
                meta.insert(key, value.trim());
            }
        }
    }
    meta
}

/// Extract command lines from every `bash` fence, in document order.
#[must_use]
pub fn extract_commands(text: &str) -> Vec<String> {
    extract_commands_tagged(text, &[DEFAULT_SHELL_TAG])
}

/// Extract command lines from fences whose tag equals one of `shell_tags`.
///
/// Tag matching is exact and case-sensitive. Within a matching fence, blank
/// lines and lines starting with `#` or `//` are skipped; every other line
/// is kept trimmed.
#[must_use]
pub fn extract_commands_tagged<S: AsRef<str>>(text: &str, shell_tags: &[S]) -> Vec<String> {
    scan(text)
        .into_iter()
        .filter_map(|span| match span {
            Span::Fence { lang, lines } if shell_tags.iter().any(|t| t.as_ref() == lang) => {
                Some(lines)
            }
            _ => None,
        })
        .flatten()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_comment(l))
        .map(str::to_string)
        .collect()
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("//")
}

/// Locate SKILL.md in a directory (prefer uppercase over lowercase).
#[must_use]
pub fn find_skill_md(dir: &Path) -> Option<PathBuf> {
    let uppercase = dir.join("SKILL.md");
    if uppercase.is_file() {
        return Some(uppercase);
    }
    let lowercase = dir.join("skill.md");
    if lowercase.is_file() {
        return Some(lowercase);
    }
    None
}

/// Resolve a user-supplied path to a skill file.
///
/// Directories are searched with [`find_skill_md`]; anything else is
/// returned unchanged and left for the reader to report.
///
/// # Errors
///
/// Returns [`ConvertError::NotFound`] if `path` is a directory without a
/// SKILL.md.
pub fn resolve_skill_path(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        find_skill_md(path).ok_or_else(|| ConvertError::NotFound {
            path: path.to_path_buf(),
        })
    } else {
        Ok(path.to_path_buf())
    }
}
