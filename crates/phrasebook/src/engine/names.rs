//! Name translation: the dictionaries consulted for free text captured by a
//! rule, and for item, NPC and quest names shown on their own.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::engine::error::{LoadError, LoadReport, LoadWarning};
use crate::parser::parse_pairs;
use crate::text::{normalize, visible};

/// Translates a single name, or declines.
///
/// Implementations are pure lookups: `None` means no translation is known
/// and the caller keeps the English text.
pub trait NameTranslator: Send + Sync {
    fn translate(&self, name: &str) -> Option<String>;
}

/// An ordered chain of name translators. The first one that answers wins.
///
/// An empty chain translates nothing.
#[derive(Clone, Default)]
pub struct NameChain {
    translators: Vec<Arc<dyn NameTranslator>>,
}

impl NameChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a translator, consulted after the ones already present.
    pub fn with(mut self, translator: Arc<dyn NameTranslator>) -> Self {
        self.translators.push(translator);
        self
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }
}

impl Debug for NameChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("NameChain")
            .field("translators", &self.translators.len())
            .finish()
    }
}

impl NameTranslator for NameChain {
    fn translate(&self, name: &str) -> Option<String> {
        self.translators
            .iter()
            .find_map(|translator| translator.translate(name))
    }
}

/// An exact-match table keyed by normalized English text.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dictionary from a pipe-delimited file.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, LoadReport), LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::load_str(&content))
    }

    /// Load a dictionary from pipe-delimited text.
    ///
    /// Lines are taken literally: brackets and parentheses are part of the
    /// key.
    pub fn load_str(content: &str) -> (Self, LoadReport) {
        let file = parse_pairs(content);
        let mut dictionary = Self::new();
        let mut report = LoadReport {
            warnings: file.warnings,
            ..LoadReport::default()
        };

        for pair in file.pairs {
            let key = normalize(&pair.english);
            if key.is_empty() {
                report.warnings.push(LoadWarning::EmptyField { line: pair.line });
                continue;
            }
            if dictionary.entries.insert(key.clone(), pair.french).is_some() {
                report.warnings.push(LoadWarning::DuplicateEntry {
                    line: pair.line,
                    key,
                });
            }
            report.exact += 1;
        }

        (dictionary, report)
    }

    /// Insert an entry. Returns the French text it replaced, if any.
    pub fn insert(&mut self, english: &str, french: impl Into<String>) -> Option<String> {
        self.entries.insert(normalize(english), french.into())
    }

    /// Look up the French text for `english` after normalization.
    pub fn get(&self, english: &str) -> Option<&str> {
        self.entries.get(&normalize(english)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NameTranslator for Dictionary {
    fn translate(&self, name: &str) -> Option<String> {
        let name = visible(name);
        if name.is_empty() {
            return None;
        }
        self.get(&name).map(ToString::to_string)
    }
}

static QUANTITY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)(\s*)\((\d+)\)$").expect("quantity suffix pattern is valid")
});

/// Item names, which may carry a `(N)` dose or quantity suffix.
///
/// `Prayer potion(3)` is looked up as `Prayer potion` and the suffix is put
/// back after the French name. Entries that include the suffix themselves
/// are found by the fallback lookup of the whole name.
#[derive(Debug, Clone, Default)]
pub struct ItemDictionary {
    names: Dictionary,
}

impl ItemDictionary {
    pub fn new(names: Dictionary) -> Self {
        Self { names }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.names
    }
}

impl From<Dictionary> for ItemDictionary {
    fn from(names: Dictionary) -> Self {
        Self::new(names)
    }
}

impl NameTranslator for ItemDictionary {
    fn translate(&self, name: &str) -> Option<String> {
        let original = visible(name);
        if original.is_empty() {
            return None;
        }

        if let Some(caps) = QUANTITY_SUFFIX.captures(&original) {
            let base = caps[1].trim();
            if let Some(french) = self.names.get(base) {
                return Some(format!("{french}{}({})", &caps[2], &caps[3]));
            }
        }

        self.names.get(&original).map(ToString::to_string)
    }
}
