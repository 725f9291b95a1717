//! Configuration for which translation sources are loaded and used.

use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Conventional file name of the dialog rules source.
pub const DIALOG_FILE: &str = "dialog_french.txt";
/// Conventional file name of the item names source.
pub const ITEM_FILE: &str = "item_french.txt";
/// Conventional file name of the NPC names source.
pub const NPC_FILE: &str = "npc_french.txt";
/// Conventional file name of the quest names source.
pub const QUEST_FILE: &str = "quest_french.txt";

/// Source paths and feature toggles.
///
/// Every toggle defaults to on. A source without a path is treated as absent.
///
/// # Example
///
/// ```
/// use phrasebook::TranslationConfig;
///
/// let config = TranslationConfig::builder()
///     .dialogs("data/dialog_french.txt")
///     .translate_quests(false)
///     .build();
///
/// assert!(config.translate_dialogs);
/// assert!(!config.translate_quests);
/// assert!(config.items.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Dialog lines, prompts and labels: exact entries and template rules.
    #[builder(into)]
    pub dialogs: Option<PathBuf>,

    /// Item names.
    #[builder(into)]
    pub items: Option<PathBuf>,

    /// NPC names.
    #[builder(into)]
    pub npcs: Option<PathBuf>,

    /// Quest names.
    #[builder(into)]
    pub quests: Option<PathBuf>,

    #[builder(default = true)]
    pub translate_dialogs: bool,

    #[builder(default = true)]
    pub translate_items: bool,

    #[builder(default = true)]
    pub translate_npcs: bool,

    #[builder(default = true)]
    pub translate_quests: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        TranslationConfig::builder().build()
    }
}

impl TranslationConfig {
    /// All four sources under `dir`, with their conventional file names.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        TranslationConfig::builder()
            .dialogs(dir.join(DIALOG_FILE))
            .items(dir.join(ITEM_FILE))
            .npcs(dir.join(NPC_FILE))
            .quests(dir.join(QUEST_FILE))
            .build()
    }
}
