//! Error and warning types for loading and compiling translations.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use strsim::levenshtein;
use thiserror::Error;

use crate::parser::ParseError;

/// Errors that make a translation source unusable.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file is missing or unreadable.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source that the configuration enables has no path.
    #[error("no path configured for {source_name} translations")]
    MissingPath { source_name: String },
}

/// An error that prevents one template pair from becoming a rule.
#[derive(Debug, Error)]
pub enum CompileError {
    /// One of the two templates failed to parse.
    #[error("invalid template '{template}': {source}")]
    Parse {
        template: String,
        #[source]
        source: ParseError,
    },

    /// The generated matcher was rejected by the regex engine.
    #[error("cannot build matcher for '{template}': {source}")]
    Pattern {
        template: String,
        #[source]
        source: regex::Error,
    },
}

/// A non-fatal problem found while loading a data file.
///
/// The offending line is skipped (or, for count mismatches, loaded as is)
/// and loading continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadWarning {
    /// No `|` separator, a separator at the start, or nothing after it.
    MalformedLine { line: usize, content: String },

    /// The English or French field is empty after trimming.
    EmptyField { line: usize },

    /// The template pair could not be compiled and was dropped.
    CompileFailed { line: usize, message: String },

    /// The English and French templates declare a different number of
    /// placeholders. French placeholders bind to English ones by position.
    PlaceholderCountMismatch {
        line: usize,
        english: usize,
        french: usize,
    },

    /// An exact entry replaced an earlier one with the same normalized key.
    DuplicateEntry { line: usize, key: String },
}

impl LoadWarning {
    /// The 1-based source line the warning refers to.
    pub fn line(&self) -> usize {
        match self {
            LoadWarning::MalformedLine { line, .. }
            | LoadWarning::EmptyField { line }
            | LoadWarning::CompileFailed { line, .. }
            | LoadWarning::PlaceholderCountMismatch { line, .. }
            | LoadWarning::DuplicateEntry { line, .. } => *line,
        }
    }
}

impl Display for LoadWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LoadWarning::MalformedLine { line, content } => {
                write!(f, "line {line}: malformed pair '{content}'")
            }
            LoadWarning::EmptyField { line } => {
                write!(f, "line {line}: empty english or french field")
            }
            LoadWarning::CompileFailed { line, message } => {
                write!(f, "line {line}: template dropped: {message}")
            }
            LoadWarning::PlaceholderCountMismatch {
                line,
                english,
                french,
            } => write!(
                f,
                "line {line}: english declares {english} placeholder(s), french declares {french}"
            ),
            LoadWarning::DuplicateEntry { line, key } => {
                write!(f, "line {line}: '{key}' replaces an earlier entry")
            }
        }
    }
}

/// Summary of one data file load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Lines stored in the exact table.
    pub exact: usize,
    /// Lines compiled into rules.
    pub rules: usize,
    /// Problems found along the way.
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    /// Number of valid lines loaded.
    pub fn loaded(&self) -> usize {
        self.exact + self.rules
    }
}

/// Compute near-miss suggestions for a key using Levenshtein distance.
///
/// Returns at most three candidates, closest first. Keys of three characters
/// or fewer accept a distance of 1, longer keys a distance of 2.
pub fn compute_suggestions<S: AsRef<str>>(key: &str, available: &[S]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };

    let mut scored: Vec<(usize, &str)> = available
        .iter()
        .map(<S as AsRef<str>>::as_ref)
        .map(|candidate| (levenshtein(key, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_unstable();

    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
