//! Pipe-delimited data file parser.
//!
//! One `english|french` pair per line. Empty lines and `#` comments are
//! skipped, as is an optional `english|french` header on the first content
//! line. Malformed lines are reported and skipped without stopping the rest
//! of the file.

use crate::engine::LoadWarning;
use crate::text::strip_bom;

use super::ast::TranslationPair;

const HEADER: &str = "english|french";

/// The pairs and warnings parsed from one data file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairFile {
    pub pairs: Vec<TranslationPair>,
    pub warnings: Vec<LoadWarning>,
}

/// Parse the contents of a pipe-delimited data file.
///
/// ```
/// use phrasebook::parser::parse_pairs;
///
/// let file = parse_pairs("english|french\nHello|Bonjour\nbroken line\n");
/// assert_eq!(file.pairs.len(), 1);
/// assert_eq!(file.pairs[0].french, "Bonjour");
/// assert_eq!(file.warnings.len(), 1);
/// ```
pub fn parse_pairs(content: &str) -> PairFile {
    let mut file = PairFile::default();
    let mut first_content_line = true;

    for (index, raw) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = strip_bom(raw).trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if first_content_line {
            first_content_line = false;
            if line.eq_ignore_ascii_case(HEADER) {
                continue;
            }
        }

        match parse_line(line, line_number) {
            Ok(pair) => file.pairs.push(pair),
            Err(warning) => {
                tracing::debug!(line = line_number, %warning, "skipping data line");
                file.warnings.push(warning);
            }
        }
    }

    file
}

fn parse_line(line: &str, line_number: usize) -> Result<TranslationPair, LoadWarning> {
    let separator = match line.find('|') {
        Some(pos) if pos > 0 && pos + 1 < line.len() => pos,
        _ => {
            return Err(LoadWarning::MalformedLine {
                line: line_number,
                content: line.to_string(),
            });
        }
    };

    let english = line[..separator].trim();
    let french = line[separator + 1..].trim();
    if english.is_empty() || french.is_empty() {
        return Err(LoadWarning::EmptyField { line: line_number });
    }

    Ok(TranslationPair {
        english: english.to_string(),
        french: french.to_string(),
        line: line_number,
    })
}
