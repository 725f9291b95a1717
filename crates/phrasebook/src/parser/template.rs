//! Template string parser using winnow.
//!
//! Parses English and French template strings into segments. Handles:
//! - Literal text
//! - Bracket spans `[topic]`, always a placeholder
//! - Parenthesis spans `(him/her)`, a placeholder unless the content is
//!   `s`, which stays literal as the optional-plural marker `(s)`
//! - Unterminated spans, which turn the rest of the input into literal text

use winnow::combinator::{alt, delimited, peek, repeat};
use winnow::prelude::*;
use winnow::token::{one_of, rest, take_till};

use super::ast::{Segment, Template};
use super::error::ParseError;

/// The literal text kept for a `(s)` span.
pub(crate) const PLURAL_MARKER: &str = "(s)";

/// Parse a template string into segments.
///
/// Whichever of `[` or `(` comes first opens a span, closed by the matching
/// `]` or `)`. Segment order and count follow the authored text.
pub fn parse_template(input: &str) -> Result<Template, ParseError> {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) => {
            if remaining.is_empty() {
                Ok(t)
            } else {
                let (line, column) = calculate_position(input, remaining);
                Err(ParseError::Syntax {
                    line,
                    column,
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                })
            }
        }
        Err(e) => {
            let (line, column) = calculate_position(input, remaining);
            Err(ParseError::Syntax {
                line,
                column,
                message: format!("parse error: {e}"),
            })
        }
    }
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed_str.rfind('\n') {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

fn template(input: &mut &str) -> ModalResult<Template> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(Template { segments })
}

fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((bracket_span, paren_span, unterminated, literal)).parse_next(input)
}

/// `[token]`
fn bracket_span(input: &mut &str) -> ModalResult<Segment> {
    delimited('[', take_till(0.., ']'), ']')
        .map(|inner: &str| Segment::Placeholder(inner.trim().to_string()))
        .parse_next(input)
}

/// `(token)`, or the plural marker `(s)`.
fn paren_span(input: &mut &str) -> ModalResult<Segment> {
    delimited('(', take_till(0.., ')'), ')')
        .map(|inner: &str| {
            let token = inner.trim();
            if token.eq_ignore_ascii_case("s") {
                Segment::Literal(PLURAL_MARKER.to_string())
            } else {
                Segment::Placeholder(token.to_string())
            }
        })
        .parse_next(input)
}

/// An opener with no matching closer: everything left is literal.
fn unterminated(input: &mut &str) -> ModalResult<Segment> {
    (peek(one_of(['[', '('])), rest)
        .map(|(_, remainder): (char, &str)| Segment::Literal(remainder.to_string()))
        .parse_next(input)
}

/// A run of text up to the next opener.
fn literal(input: &mut &str) -> ModalResult<Segment> {
    take_till(1.., ['[', '('])
        .map(|text: &str| Segment::Literal(text.to_string()))
        .parse_next(input)
}

/// Decides whether an English line needs rule compilation.
///
/// A line is templated when it has a `[...]` span, or a `(...)` span whose
/// trimmed content is non-empty, is not the plural marker `s`, and contains
/// a letter. Purely numeric parentheticals such as a dose count `(4)` stay
/// literal text.
///
/// ```
/// use phrasebook::parser::needs_template;
///
/// assert!(needs_template("Talk to (him/her)."));
/// assert!(!needs_template("Super energy(4)"));
/// assert!(!needs_template("You found the coin(s)."));
/// ```
pub fn needs_template(english: &str) -> bool {
    let has_bracket_span = english
        .find('[')
        .is_some_and(|open| english[open + 1..].contains(']'));
    if has_bracket_span {
        return true;
    }

    let mut search_from = 0;
    while let Some(open_rel) = english[search_from..].find('(') {
        let open = search_from + open_rel;
        let Some(close_rel) = english[open + 1..].find(')') else {
            break;
        };
        let close = open + 1 + close_rel;

        let token = english[open + 1..close].trim();
        if !token.is_empty() && !token.eq_ignore_ascii_case("s") {
            let has_letter = token.chars().any(char::is_alphabetic);
            let all_digits = token.chars().all(|c| c.is_ascii_digit());
            if has_letter && !all_digits {
                return true;
            }
        }

        search_from = close + 1;
    }

    false
}
