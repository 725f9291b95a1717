//! The translation service: every table a caller needs, built once.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::sync::{Arc, LazyLock, OnceLock};

use regex::Regex;

use crate::config::TranslationConfig;
use crate::engine::{
    Dictionary, ItemDictionary, LoadError, LoadReport, NameChain, NameTranslator, TranslationTable,
};
use crate::text::{normalize, normalize_apostrophes, preserve_outer_tags, strip_tags, visible};

static LEVEL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(level-\d+\)$").expect("level suffix pattern is valid"));

static QUEST_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bQuest\s+list\b").expect("quest list pattern is valid"));

static COMPLETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bCompleted\b").expect("completed pattern is valid"));

static QUEST_POINTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bQuest\s+Points\b").expect("quest points pattern is valid")
});

/// One of the four data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Dialogs,
    Items,
    Npcs,
    Quests,
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Source::Dialogs => "dialog",
            Source::Items => "item",
            Source::Npcs => "npc",
            Source::Quests => "quest",
        };
        f.write_str(name)
    }
}

/// Dialog rules plus the item, NPC and quest dictionaries.
///
/// Immutable once loaded and safe to share between threads. Every
/// `translate_*` method returns `None` when nothing applies; callers keep the
/// original text in that case, never an empty string.
///
/// Free text captured by a dialog rule is offered to the item dictionary and
/// then to the NPC dictionary. Both take part whenever they are loaded; the
/// `translate_items` and `translate_npcs` toggles only gate the direct name
/// lookups.
#[derive(Debug)]
pub struct Phrasebook {
    config: TranslationConfig,
    dialogs: Option<TranslationTable>,
    items: Option<Arc<ItemDictionary>>,
    npcs: Option<Arc<Dictionary>>,
    quests: Option<Dictionary>,
    names: NameChain,
    reports: Vec<(Source, LoadReport)>,
}

impl Phrasebook {
    /// Load every configured source.
    ///
    /// The dialog table is required while `translate_dialogs` is on: a
    /// missing path or an unreadable file fails the whole load. Name sources
    /// that fail to load are logged and left out.
    pub fn load(config: &TranslationConfig) -> Result<Self, LoadError> {
        let mut reports = Vec::new();

        let dialogs = if config.translate_dialogs {
            let path = config.dialogs.as_deref().ok_or_else(|| LoadError::MissingPath {
                source_name: Source::Dialogs.to_string(),
            })?;
            let (table, report) = TranslationTable::load(path).inspect_err(|e| {
                tracing::error!(
                    source = %Source::Dialogs,
                    error = %e,
                    "translations failed to load"
                );
            })?;
            log_loaded(Source::Dialogs, path, &report);
            reports.push((Source::Dialogs, report));
            Some(table)
        } else {
            None
        };

        let items = load_dictionary(Source::Items, config.items.as_deref(), true, &mut reports)
            .map(|names| Arc::new(ItemDictionary::new(names)));
        let npcs = load_dictionary(Source::Npcs, config.npcs.as_deref(), true, &mut reports)
            .map(Arc::new);
        let quests = load_dictionary(
            Source::Quests,
            config.quests.as_deref(),
            config.translate_quests,
            &mut reports,
        );

        let mut names = NameChain::new();
        if let Some(items) = &items {
            names = names.with(Arc::clone(items) as Arc<dyn NameTranslator>);
        }
        if let Some(npcs) = &npcs {
            names = names.with(Arc::clone(npcs) as Arc<dyn NameTranslator>);
        }

        Ok(Self {
            config: config.clone(),
            dialogs,
            items,
            npcs,
            quests,
            names,
            reports,
        })
    }

    /// Translate a dialog line, prompt or label.
    ///
    /// Returns the bare French text for the visible portion of `text`.
    pub fn translate_dialog(&self, text: &str) -> Option<String> {
        if !self.config.translate_dialogs {
            return None;
        }
        self.dialogs.as_ref()?.translate(text, &self.names)
    }

    /// Translate a dialog line and wrap the result in the outer tags of the
    /// original text.
    pub fn translate_dialog_tagged(&self, raw: &str) -> Option<String> {
        self.translate_dialog(raw)
            .map(|french| preserve_outer_tags(raw, &french))
    }

    /// Translate an item name, keeping any `(N)` suffix.
    pub fn translate_item_name(&self, name: &str) -> Option<String> {
        if !self.config.translate_items {
            return None;
        }
        self.items.as_ref()?.translate(name)
    }

    pub fn translate_npc_name(&self, name: &str) -> Option<String> {
        if !self.config.translate_npcs {
            return None;
        }
        self.npcs.as_ref()?.translate(name)
    }

    /// Translate a quest name. Typographic apostrophes in `name` match plain
    /// ones in the data.
    pub fn translate_quest_name(&self, name: &str) -> Option<String> {
        if !self.config.translate_quests {
            return None;
        }
        self.quests
            .as_ref()?
            .translate(&normalize_apostrophes(name))
    }

    /// Translate a short label that names an NPC or an item.
    ///
    /// The NPC dictionary is consulted first, then the item dictionary. The
    /// result keeps the outer tags of `raw`.
    pub fn translate_label(&self, raw: &str) -> Option<String> {
        let label = visible(raw);
        if label.is_empty() {
            return None;
        }

        let french = self
            .translate_npc_name(&label)
            .or_else(|| self.translate_item_name(&label))?;
        Some(preserve_outer_tags(raw, &french))
    }

    /// Translate the target of a menu entry, such as `<col=ffff00>Cook  (level-2)`.
    ///
    /// A trailing ` (level-N)` is ignored for the lookup. The NPC dictionary
    /// is consulted first, then the item dictionary, and the English name is
    /// replaced in place so markup and level stay untouched.
    pub fn translate_menu_target(&self, target: &str) -> Option<String> {
        let clean = strip_tags(target);
        let base = LEVEL_SUFFIX.replace(&clean, "");
        let base = base.trim();
        if base.is_empty() {
            return None;
        }

        let french = self
            .translate_npc_name(base)
            .or_else(|| self.translate_item_name(base))?;
        let out = target.replace(base, &french);
        (out != target).then_some(out)
    }

    /// Translate the fixed labels of the quest panel: the `Quest list` title
    /// and the `Completed` and `Quest Points` counters.
    ///
    /// Only the English words are replaced; markup and numbers are kept.
    pub fn translate_quest_panel_label(&self, raw: &str) -> Option<String> {
        if !self.config.translate_quests {
            return None;
        }
        let label = visible(raw);
        if label.is_empty() {
            return None;
        }

        let lower = label.to_lowercase();
        let out = if normalize(&label) == "quest list" {
            QUEST_LIST.replace_all(raw, "Liste des quêtes")
        } else if lower.starts_with("completed") {
            COMPLETED.replace(raw, "Terminées")
        } else if lower.starts_with("quest points") {
            QUEST_POINTS.replace(raw, "Points de quête")
        } else {
            return None;
        };
        (out != raw).then(|| out.into_owned())
    }

    /// Exact dialog entries whose English text is close to `text`.
    pub fn suggestions(&self, text: &str) -> Vec<String> {
        self.dialogs
            .as_ref()
            .map(|table| table.suggestions(&visible(text)))
            .unwrap_or_default()
    }

    /// The dialog table, when loaded.
    pub fn dialogs(&self) -> Option<&TranslationTable> {
        self.dialogs.as_ref()
    }

    /// The chain consulted for free text captured by dialog rules.
    pub fn names(&self) -> &NameChain {
        &self.names
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    /// Load reports of the sources that loaded, in load order.
    pub fn reports(&self) -> &[(Source, LoadReport)] {
        &self.reports
    }

    /// The load report of one source, when it loaded.
    pub fn report(&self, source: Source) -> Option<&LoadReport> {
        self.reports
            .iter()
            .find(|(loaded, _)| *loaded == source)
            .map(|(_, report)| report)
    }
}

fn load_dictionary(
    source: Source,
    path: Option<&Path>,
    enabled: bool,
    reports: &mut Vec<(Source, LoadReport)>,
) -> Option<Dictionary> {
    if !enabled {
        tracing::debug!(%source, "translations disabled, not loading");
        return None;
    }
    let Some(path) = path else {
        tracing::debug!(%source, "no path configured, not loading");
        return None;
    };

    match Dictionary::load(path) {
        Ok((dictionary, report)) => {
            log_loaded(source, path, &report);
            reports.push((source, report));
            Some(dictionary)
        }
        Err(e) => {
            tracing::error!(%source, error = %e, "translations failed to load and are disabled");
            None
        }
    }
}

fn log_loaded(source: Source, path: &Path, report: &LoadReport) {
    tracing::info!(
        %source,
        count = report.loaded(),
        warnings = report.warnings.len(),
        path = %path.display(),
        "loaded translations"
    );
}

/// A [`Phrasebook`] built on first use and shared afterwards.
///
/// Concurrent first callers block behind a single load and all observe the
/// same outcome. A failed load is kept: every later call sees the same
/// error and no reload is attempted.
///
/// ```
/// use phrasebook::{SharedPhrasebook, TranslationConfig};
///
/// let shared = SharedPhrasebook::new(TranslationConfig::from_dir("no/such/dir"));
/// assert!(shared.get().is_err());
/// assert_eq!(shared.translate_dialog("Hello"), None);
/// ```
#[derive(Debug)]
pub struct SharedPhrasebook {
    config: TranslationConfig,
    cell: OnceLock<Result<Phrasebook, LoadError>>,
}

impl SharedPhrasebook {
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            config,
            cell: OnceLock::new(),
        }
    }

    /// Load the phrasebook, or reuse the result of the first load.
    pub fn get(&self) -> Result<&Phrasebook, &LoadError> {
        self.cell
            .get_or_init(|| Phrasebook::load(&self.config))
            .as_ref()
    }

    /// Whether a load has been attempted.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Translate a dialog line. `None` when nothing applies or the load
    /// failed.
    pub fn translate_dialog(&self, text: &str) -> Option<String> {
        self.get().ok()?.translate_dialog(text)
    }
}
