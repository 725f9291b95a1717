//! The dialog translation table: exact entries plus bucketed template rules.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::engine::compiler::compile;
use crate::engine::error::{LoadError, LoadReport, LoadWarning, compute_suggestions};
use crate::engine::names::NameTranslator;
use crate::engine::rule::CompiledRule;
use crate::parser::{TranslationPair, needs_template, parse_pairs};
use crate::text::{first_word, normalize, visible};

/// Exact entries and template rules for one data source.
///
/// Built once, read-only afterwards. Exact entries are keyed by normalized
/// English text. Rules are grouped by the first literal word of their
/// English template and kept in source order, so the first matching rule in
/// the file wins.
#[derive(Debug, Default)]
pub struct TranslationTable {
    exact: HashMap<String, String>,
    buckets: HashMap<String, Vec<CompiledRule>>,
    rule_count: usize,
}

impl TranslationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from a pipe-delimited file.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, LoadReport), LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::load_str(&content))
    }

    /// Load a table from pipe-delimited text.
    ///
    /// ```
    /// use phrasebook::engine::{NameChain, TranslationTable};
    ///
    /// let (table, report) = TranslationTable::load_str(
    ///     "Click here to continue|Cliquez ici pour continuer\n\
    ///      Hello [name]!|Bonjour [name] !\n",
    /// );
    /// assert_eq!(report.exact, 1);
    /// assert_eq!(report.rules, 1);
    ///
    /// let names = NameChain::new();
    /// assert_eq!(
    ///     table.translate("CLICK here to continue", &names).as_deref(),
    ///     Some("Cliquez ici pour continuer")
    /// );
    /// assert_eq!(table.translate("Hello Bob!", &names).as_deref(), Some("Bonjour Bob !"));
    /// ```
    pub fn load_str(content: &str) -> (Self, LoadReport) {
        let file = parse_pairs(content);
        let mut table = Self::new();
        let mut report = LoadReport {
            warnings: file.warnings,
            ..LoadReport::default()
        };

        for pair in file.pairs {
            table.add_pair(pair, &mut report);
        }

        report.warnings.sort_by_key(LoadWarning::line);
        (table, report)
    }

    /// Add one pair: an exact entry, or a compiled rule when the English side
    /// is templated. Compilation failures drop the pair.
    pub fn add_pair(&mut self, pair: TranslationPair, report: &mut LoadReport) {
        if !needs_template(&pair.english) {
            let key = normalize(&pair.english);
            if self.exact.insert(key.clone(), pair.french).is_some() {
                report.warnings.push(LoadWarning::DuplicateEntry {
                    line: pair.line,
                    key,
                });
            }
            report.exact += 1;
            return;
        }

        match compile(&pair.english, &pair.french) {
            Ok(rule) => {
                if !rule.placeholders_balanced() {
                    report.warnings.push(LoadWarning::PlaceholderCountMismatch {
                        line: pair.line,
                        english: rule.placeholders().len(),
                        french: rule.french_placeholder_count(),
                    });
                }
                self.insert_rule(rule);
                report.rules += 1;
            }
            Err(e) => {
                tracing::debug!(line = pair.line, error = %e, "dropping template pair");
                report.warnings.push(LoadWarning::CompileFailed {
                    line: pair.line,
                    message: e.to_string(),
                });
            }
        }
    }

    /// Append a compiled rule to the end of its bucket.
    pub fn insert_rule(&mut self, rule: CompiledRule) {
        self.buckets
            .entry(rule.bucket().to_string())
            .or_default()
            .push(rule);
        self.rule_count += 1;
    }

    /// Translate runtime text.
    ///
    /// Returns `None` when neither an exact entry nor a rule applies; the
    /// caller keeps the original text. Dispatch order:
    /// 1. exact entry for the normalized visible text;
    /// 2. rules in the bucket of the first word, or in the empty bucket when
    ///    that word has none, tried in source order until one matches.
    pub fn translate(&self, text: &str, names: &dyn NameTranslator) -> Option<String> {
        let visible = visible(text);
        if visible.is_empty() {
            return None;
        }

        let key = normalize(&visible);
        if let Some(french) = self.exact.get(&key) {
            return Some(french.clone());
        }

        let rules = self
            .buckets
            .get(first_word(&key))
            .or_else(|| self.buckets.get(""))?;

        let translated = rules.iter().find_map(|rule| rule.apply(&visible, names));
        if translated.is_none() {
            tracing::trace!(text = %visible, "no rule matched");
        }
        translated
    }

    /// Look up an exact entry by normalized English text.
    pub fn exact(&self, english: &str) -> Option<&str> {
        self.exact.get(&normalize(english)).map(String::as_str)
    }

    /// Rules dispatched under `bucket`, in source order.
    pub fn rules_in(&self, bucket: &str) -> &[CompiledRule] {
        self.buckets.get(bucket).map_or(&[][..], Vec::as_slice)
    }

    /// Number of exact entries.
    pub fn exact_len(&self) -> usize {
        self.exact.len()
    }

    /// Number of compiled rules across all buckets.
    pub fn rule_len(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.rule_count == 0
    }

    /// Exact entries whose English key is a near miss for `text`.
    pub fn suggestions(&self, text: &str) -> Vec<String> {
        let key = normalize(text);
        let mut keys: Vec<&String> = self.exact.keys().collect();
        keys.sort_unstable();
        compute_suggestions(&key, &keys)
    }
}
