//! Rule engine: compiles template pairs and dispatches runtime text.
//!
//! A [`TranslationTable`] holds exact entries and [`CompiledRule`]s grouped
//! by their leading literal word. Free text captured by a rule is offered to
//! a [`NameTranslator`] (usually a [`NameChain`] of dictionaries) before it
//! is placed in the French output.

mod compiler;
mod error;
mod names;
mod rule;
mod table;

pub use compiler::compile;
pub use error::{CompileError, LoadError, LoadReport, LoadWarning, compute_suggestions};
pub use names::{Dictionary, ItemDictionary, NameChain, NameTranslator};
pub use rule::{CompiledRule, EnglishPlaceholder, RenderSegment};
pub use table::TranslationTable;
