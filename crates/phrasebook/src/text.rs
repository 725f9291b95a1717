//! Text normalization shared by the load and query paths.
//!
//! Runtime strings carry inline formatting markup (`<col=ff0000>`, `<br>`)
//! that never takes part in a lookup. Every key stored in a table and every
//! key computed from a query goes through [`normalize`], so two strings that
//! differ only in markup, case, or incidental whitespace resolve to the same
//! entry.

use std::sync::LazyLock;

use regex::Regex;

static LINE_BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern is valid"));

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"));

/// Removes formatting markup. Line break tags become a single space so the
/// words on either side stay separate.
pub fn strip_tags(text: &str) -> String {
    if !text.contains('<') {
        return text.to_string();
    }
    let spaced = LINE_BREAK_TAG.replace_all(text, " ");
    MARKUP_TAG.replace_all(&spaced, "").into_owned()
}

/// Strips markup and trims. Case and inner whitespace are preserved.
pub fn visible(text: &str) -> String {
    strip_tags(text).trim().to_string()
}

/// Builds a lookup key: markup stripped, whitespace runs collapsed to a single
/// space, trimmed, lower-cased.
///
/// ```
/// use phrasebook::text::normalize;
///
/// assert_eq!(normalize("  <col=ffffff>Click   HERE</col> "), "click here");
/// ```
pub fn normalize(text: &str) -> String {
    strip_tags(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Returns the text up to the first space, or the whole text.
///
/// Expects a normalized key, where words are separated by single spaces.
pub fn first_word(key: &str) -> &str {
    match key.find(' ') {
        Some(pos) if pos > 0 => &key[..pos],
        _ => key,
    }
}

/// Drops a leading UTF-8 byte-order mark.
pub fn strip_bom(line: &str) -> &str {
    line.strip_prefix('\u{feff}').unwrap_or(line)
}

/// Replaces typographic apostrophes and backticks with `'`.
pub fn normalize_apostrophes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '`' => '\'',
            other => other,
        })
        .collect()
}

/// Wraps `replacement` in the opening tags that lead `original` and the
/// closing tags that end it.
///
/// Callers translate the visible portion of a string and use this to keep
/// the surrounding color or style markup in place.
///
/// ```
/// use phrasebook::text::preserve_outer_tags;
///
/// assert_eq!(
///     preserve_outer_tags("<col=ffffff>Hello</col>", "Bonjour"),
///     "<col=ffffff>Bonjour</col>"
/// );
/// ```
pub fn preserve_outer_tags(original: &str, replacement: &str) -> String {
    if !original.contains('<') {
        return replacement.to_string();
    }

    let mut prefix_end = 0;
    while original[prefix_end..].starts_with('<') {
        let Some(close) = original[prefix_end..].find('>') else {
            break;
        };
        let tag = &original[prefix_end..=prefix_end + close];
        if tag.starts_with("</") {
            break;
        }
        prefix_end += close + 1;
    }

    let mut suffix_start = original.len();
    while suffix_start > prefix_end {
        let head = &original[..suffix_start];
        if !head.ends_with('>') {
            break;
        }
        let Some(open) = head.rfind('<') else {
            break;
        };
        if open < prefix_end || !head[open..].starts_with("</") {
            break;
        }
        suffix_start = open;
    }

    let prefix = &original[..prefix_end];
    let suffix = &original[suffix_start..];
    if prefix.is_empty() && suffix.is_empty() {
        return replacement.to_string();
    }
    format!("{prefix}{replacement}{suffix}")
}
