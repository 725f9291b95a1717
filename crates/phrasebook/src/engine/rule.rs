//! Compiled template rules and their rendering.

use regex::{Captures, Regex};

use crate::engine::names::NameTranslator;

/// The compiled form of one English placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnglishPlaceholder {
    /// Matches any non-empty run of text, non-greedy.
    Variable { group: usize },
    /// Matches exactly one of a fixed set of literals.
    Option {
        group: usize,
        /// Options as authored.
        options: Vec<String>,
        /// The same options lower-cased, for lookup of the captured text.
        folded: Vec<String>,
    },
}

impl EnglishPlaceholder {
    pub(crate) fn variable(group: usize) -> Self {
        EnglishPlaceholder::Variable { group }
    }

    pub(crate) fn option(group: usize, options: Vec<String>) -> Self {
        let folded = options.iter().map(|o| o.to_lowercase()).collect();
        EnglishPlaceholder::Option {
            group,
            options,
            folded,
        }
    }

    /// The 1-based capture group in the rule's matcher.
    pub fn group(&self) -> usize {
        match self {
            EnglishPlaceholder::Variable { group } | EnglishPlaceholder::Option { group, .. } => {
                *group
            }
        }
    }

    /// Position of `captured` in the option list, compared case-insensitively.
    fn option_index(&self, captured: &str) -> Option<usize> {
        match self {
            EnglishPlaceholder::Option { folded, .. } => {
                let captured = captured.to_lowercase();
                folded.iter().position(|option| *option == captured)
            }
            EnglishPlaceholder::Variable { .. } => None,
        }
    }
}

/// One segment of a French render plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderSegment {
    /// Emitted verbatim.
    Literal(String),
    /// Emits the text captured by the `index`-th English placeholder
    /// (0-based, by position of occurrence). `options` holds the French
    /// alternatives when the French token is a `/` list.
    Placeholder {
        index: usize,
        options: Option<Vec<String>>,
    },
}

/// A template pair compiled into a matcher and a render plan.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub(crate) matcher: Regex,
    pub(crate) placeholders: Vec<EnglishPlaceholder>,
    pub(crate) plan: Vec<RenderSegment>,
    pub(crate) bucket: String,
}

impl CompiledRule {
    /// The anchored, case-insensitive matcher built from the English template.
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    /// English placeholders in template order.
    pub fn placeholders(&self) -> &[EnglishPlaceholder] {
        &self.placeholders
    }

    /// The French render plan.
    pub fn plan(&self) -> &[RenderSegment] {
        &self.plan
    }

    /// The leading literal word used to dispatch to this rule, or the empty
    /// string for rules that start with a placeholder.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Number of French placeholders.
    pub fn french_placeholder_count(&self) -> usize {
        self.plan
            .iter()
            .filter(|segment| matches!(segment, RenderSegment::Placeholder { .. }))
            .count()
    }

    /// Returns true if both templates declare the same number of placeholders.
    pub fn placeholders_balanced(&self) -> bool {
        self.placeholders.len() == self.french_placeholder_count()
    }

    /// Matches `visible` against the whole English template and renders the
    /// French output on success.
    pub fn apply(&self, visible: &str, names: &dyn NameTranslator) -> Option<String> {
        let captures = self.matcher.captures(visible)?;
        Some(self.render(&captures, names))
    }

    /// Renders the plan with the given captures.
    ///
    /// Option captures are remapped to the French alternative at the same
    /// index. Free text is trimmed and offered to `names`; when no name
    /// translation exists it is emitted unchanged. A French placeholder with
    /// no English counterpart renders nothing.
    pub fn render(&self, captures: &Captures<'_>, names: &dyn NameTranslator) -> String {
        let mut out = String::new();

        for segment in &self.plan {
            let (index, french_options) = match segment {
                RenderSegment::Literal(text) => {
                    out.push_str(text);
                    continue;
                }
                RenderSegment::Placeholder { index, options } => (*index, options.as_deref()),
            };

            let Some(placeholder) = self.placeholders.get(index) else {
                continue;
            };
            let captured = captures
                .get(placeholder.group())
                .map_or("", |m| m.as_str());

            match placeholder {
                EnglishPlaceholder::Option { .. } => {
                    let remapped = placeholder
                        .option_index(captured)
                        .and_then(|i| french_options.and_then(|options| options.get(i)));
                    out.push_str(remapped.map_or(captured, String::as_str));
                }
                EnglishPlaceholder::Variable { .. } => {
                    let value = captured.trim();
                    match names.translate(value) {
                        Some(translated) => out.push_str(&translated),
                        None => out.push_str(value),
                    }
                }
            }
        }

        out
    }
}
