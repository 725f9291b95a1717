//! Compiles an English/French template pair into a [`CompiledRule`].
//!
//! The English template becomes an anchored, case-insensitive matcher:
//! literals are escaped, whitespace runs match any whitespace run, `(s)`
//! matches an optional `s`, alternation placeholders match one of their
//! options, and every other placeholder captures free text non-greedily.
//! The French template becomes a render plan whose placeholders refer to the
//! English placeholders by position.

use regex::{RegexBuilder, escape};

use crate::engine::error::CompileError;
use crate::engine::rule::{CompiledRule, EnglishPlaceholder, RenderSegment};
use crate::parser::{PLURAL_MARKER, Segment, Template, parse_template, split_options};
use crate::text::{first_word, normalize};

/// Compile a template pair.
///
/// ```
/// use phrasebook::engine::{NameChain, compile};
///
/// let rule = compile("Talk to (him/her) about [topic].", "Parler (à lui/à elle) de [topic].")
///     .unwrap();
/// let out = rule.apply("Talk to her about the quest.", &NameChain::new());
/// assert_eq!(out.as_deref(), Some("Parler à elle de the quest."));
/// ```
pub fn compile(english: &str, french: &str) -> Result<CompiledRule, CompileError> {
    let english_template = parse_template(english).map_err(|e| CompileError::Parse {
        template: english.to_string(),
        source: e,
    })?;
    let french_template = parse_template(french).map_err(|e| CompileError::Parse {
        template: french.to_string(),
        source: e,
    })?;

    let (pattern, placeholders) = build_matcher(&english_template);
    let matcher = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .unicode(true)
        .build()
        .map_err(|e| CompileError::Pattern {
            template: english.to_string(),
            source: e,
        })?;

    Ok(CompiledRule {
        matcher,
        placeholders,
        plan: build_plan(&french_template),
        bucket: bucket_key(&english_template),
    })
}

/// Build the matcher pattern and the English placeholder list.
fn build_matcher(template: &Template) -> (String, Vec<EnglishPlaceholder>) {
    let mut pattern = String::from("^");
    let mut placeholders = Vec::new();

    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => pattern.push_str(&literal_pattern(text)),
            Segment::Placeholder(token) => {
                let group = placeholders.len() + 1;
                let options = if token.contains('/') {
                    split_options(token)
                } else {
                    Vec::new()
                };

                if options.is_empty() {
                    pattern.push_str("(.+?)");
                    placeholders.push(EnglishPlaceholder::variable(group));
                } else {
                    let alternatives: Vec<String> =
                        options.iter().map(|option| escape(option)).collect();
                    pattern.push('(');
                    pattern.push_str(&alternatives.join("|"));
                    pattern.push(')');
                    placeholders.push(EnglishPlaceholder::option(group, options));
                }
            }
        }
    }

    pattern.push('$');
    (pattern, placeholders)
}

/// Convert literal text to a pattern fragment.
///
/// Whitespace runs become `\s+` so authored line breaks and double spaces
/// still match runtime text. Each `(s)` becomes an optional `s`.
fn literal_pattern(literal: &str) -> String {
    let mut pattern = String::new();
    let mut chunk = String::new();
    let mut rest = literal;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix(PLURAL_MARKER) {
            pattern.push_str(&escape(&chunk));
            chunk.clear();
            pattern.push_str("(?:s)?");
            rest = after;
        } else if c.is_whitespace() {
            pattern.push_str(&escape(&chunk));
            chunk.clear();
            pattern.push_str(r"\s+");
            rest = rest.trim_start();
        } else {
            chunk.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    pattern.push_str(&escape(&chunk));
    pattern
}

/// Build the French render plan. Placeholders are numbered by occurrence.
fn build_plan(template: &Template) -> Vec<RenderSegment> {
    let mut index = 0;
    template
        .segments
        .iter()
        .map(|segment| match segment {
            Segment::Literal(text) => RenderSegment::Literal(text.clone()),
            Segment::Placeholder(_) => {
                let placeholder = RenderSegment::Placeholder {
                    index,
                    options: segment.options(),
                };
                index += 1;
                placeholder
            }
        })
        .collect()
}

/// The first word of the English template once every span is replaced by a
/// space, or the empty string for templates that open with a placeholder.
///
/// `Hello[name]!` and `Hello there, [x].` share the bucket `hello`.
fn bucket_key(template: &Template) -> String {
    if matches!(template.segments.first(), Some(Segment::Placeholder(_))) {
        return String::new();
    }

    let literal_text: String = template
        .segments
        .iter()
        .map(|segment| match segment {
            Segment::Literal(text) if text != PLURAL_MARKER => text.as_str(),
            Segment::Literal(_) | Segment::Placeholder(_) => " ",
        })
        .collect();

    first_word(&normalize(&literal_text)).to_string()
}
