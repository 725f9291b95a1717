//! Parsed forms of data file lines and template strings.

/// One English/French line of a data file.
///
/// Both sides are trimmed and non-empty. `line` is the 1-based line number
/// in the source, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPair {
    pub english: String,
    pub french: String,
    pub line: usize,
}

/// A parsed template: segments in authored order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Number of placeholder segments.
    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Placeholder(_)))
            .count()
    }
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text emitted or matched verbatim. The optional-plural marker is kept
    /// here as the literal text `(s)`.
    Literal(String),
    /// The trimmed inner text of a `[...]` or `(...)` span, e.g. `name` or
    /// `him/her`.
    Placeholder(String),
}

impl Segment {
    /// Splits a placeholder token on `/` into trimmed, non-empty options.
    ///
    /// Returns `None` for literals and for tokens without a `/`.
    pub fn options(&self) -> Option<Vec<String>> {
        match self {
            Segment::Placeholder(token) if token.contains('/') => Some(split_options(token)),
            Segment::Placeholder(_) | Segment::Literal(_) => None,
        }
    }
}

/// Splits an alternation token like `him / her` into `["him", "her"]`.
pub fn split_options(token: &str) -> Vec<String> {
    token
        .split('/')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(ToString::to_string)
        .collect()
}
