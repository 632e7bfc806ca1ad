use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a skill.
///
/// Malformed skill content is never an error: conversion degrades to fewer
/// tools or empty parameter lists instead. Only the surrounding I/O and
/// configuration can fail.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// No SKILL.md could be located.
    #[error("no SKILL.md found in {}", path.display())]
    NotFound { path: PathBuf },

    /// Filesystem I/O error (unreadable source, unwritable output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Converter configuration could not be parsed.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

/// Convenience alias for `Result<T, ConvertError>`.
pub type Result<T> = std::result::Result<T, ConvertError>;
