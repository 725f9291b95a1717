//! Miette diagnostic wrapper for data file load warnings.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use phrasebook::LoadWarning;
use thiserror::Error;

/// A miette-compatible diagnostic pointing at the line a warning refers to.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(phrasebook::load_warning), severity(Warning))]
pub struct WarningDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("this line")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl WarningDiagnostic {
    /// Create a diagnostic from a LoadWarning with source context.
    pub fn from_load_warning(path: &Path, content: &str, warning: &LoadWarning) -> Self {
        let line_index = warning.line().saturating_sub(1);

        // Byte offset of the start of the line, and the line's length without
        // its terminator.
        let offset = content
            .split_inclusive('\n')
            .take(line_index)
            .map(str::len)
            .sum::<usize>();
        let length = content
            .split_inclusive('\n')
            .nth(line_index)
            .map_or(0, |line| line.trim_end().len());

        // Clamp to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());
        let length = length.min(content.len() - offset);

        WarningDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, length).into(),
            message: warning.to_string(),
            help: help_for(warning),
        }
    }
}

fn help_for(warning: &LoadWarning) -> Option<String> {
    match warning {
        LoadWarning::MalformedLine { .. } => {
            Some("expected `english|french` with text on both sides".into())
        }
        LoadWarning::PlaceholderCountMismatch { .. } => Some(
            "french placeholders bind to english ones by position; \
             extra ones render nothing and missing ones drop the captured text"
                .into(),
        ),
        LoadWarning::DuplicateEntry { .. } => {
            Some("the earlier entry with the same key is ignored".into())
        }
        LoadWarning::EmptyField { .. } | LoadWarning::CompileFailed { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_covers_the_warning_line() {
        let content = "Hello|Bonjour\r\nbroken\r\nYes|Oui\r\n";
        let warning = LoadWarning::MalformedLine {
            line: 2,
            content: "broken".into(),
        };
        let diagnostic = WarningDiagnostic::from_load_warning(Path::new("d.txt"), content, &warning);
        assert_eq!(diagnostic.span.offset(), 15);
        assert_eq!(diagnostic.span.len(), 6);
        assert!(diagnostic.help.is_some());
    }

    #[test]
    fn span_past_end_is_clamped() {
        let warning = LoadWarning::EmptyField { line: 9 };
        let diagnostic = WarningDiagnostic::from_load_warning(Path::new("d.txt"), "a|b\n", &warning);
        assert_eq!(diagnostic.span.offset(), 4);
        assert_eq!(diagnostic.span.len(), 0);
    }
}
