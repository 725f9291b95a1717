pub mod config;
pub mod engine;
pub mod parser;
pub mod service;
pub mod text;

pub use config::TranslationConfig;
pub use engine::{
    CompileError, CompiledRule, Dictionary, ItemDictionary, LoadError, LoadReport, LoadWarning,
    NameChain, NameTranslator, TranslationTable, compile, compute_suggestions,
};
pub use parser::{ParseError, Segment, Template, TranslationPair, needs_template, parse_template};
pub use service::{Phrasebook, SharedPhrasebook, Source};
pub use text::{normalize, visible};
