//! Template and data file parsing.
//!
//! This module turns authored text into structured input for the rule
//! engine: pipe-delimited data files into [`TranslationPair`]s, and template
//! strings into ordered literal and placeholder [`Segment`]s.

pub mod ast;
pub mod error;
mod pairs;
mod template;

pub use ast::*;
pub use error::ParseError;
pub use pairs::{PairFile, parse_pairs};
pub use template::{needs_template, parse_template};
pub(crate) use template::PLURAL_MARKER;
