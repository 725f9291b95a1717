//! Tests for the Phrasebook service, its configuration, and shared
//! initialization.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use phrasebook::config::{DIALOG_FILE, ITEM_FILE, NPC_FILE, QUEST_FILE};
use phrasebook::{LoadError, Phrasebook, SharedPhrasebook, Source, TranslationConfig};
use tempfile::TempDir;

const DIALOGS: &str = "\
english|french
# Common prompts
Click here to continue|Cliquez ici pour continuer
Talk to (him/her) about [topic].|Parler (à lui/à elle) de [topic].
You hand [item] to [name].|Vous donnez [item] à [name].
this line is broken
";

const ITEMS: &str = "Prayer potion|Potion de prière\nBronze sword|Épée en bronze\n";
const NPCS: &str = "Cook|Cuisinier\nBronze sword|Never used\n";
const QUESTS: &str = "Pirate's Treasure|Le trésor du pirate\n";

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), DIALOG_FILE, DIALOGS);
    write(dir.path(), ITEM_FILE, ITEMS);
    write(dir.path(), NPC_FILE, NPCS);
    write(dir.path(), QUEST_FILE, QUESTS);
    dir
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn config_defaults_enable_everything() {
    let config = TranslationConfig::default();
    assert!(config.translate_dialogs);
    assert!(config.translate_items);
    assert!(config.translate_npcs);
    assert!(config.translate_quests);
    assert!(config.dialogs.is_none());
}

#[test]
fn config_from_dir_uses_conventional_names() {
    let config = TranslationConfig::from_dir("data");
    assert_eq!(config.dialogs.as_deref(), Some(Path::new("data/dialog_french.txt")));
    assert_eq!(config.items.as_deref(), Some(Path::new("data/item_french.txt")));
    assert_eq!(config.npcs.as_deref(), Some(Path::new("data/npc_french.txt")));
    assert_eq!(config.quests.as_deref(), Some(Path::new("data/quest_french.txt")));
}

#[test]
fn config_deserializes_with_defaults() {
    let config: TranslationConfig = serde_json::from_str(
        r#"{ "dialogs": "dialog.txt", "translate_quests": false }"#,
    )
    .unwrap();
    assert_eq!(config.dialogs.as_deref(), Some(Path::new("dialog.txt")));
    assert!(config.items.is_none());
    assert!(config.translate_dialogs);
    assert!(!config.translate_quests);
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn load_reports_every_source() {
    let dir = data_dir();
    let book = Phrasebook::load(&TranslationConfig::from_dir(dir.path())).unwrap();

    let dialogs = book.report(Source::Dialogs).unwrap();
    assert_eq!(dialogs.exact, 1);
    assert_eq!(dialogs.rules, 2);
    assert_eq!(dialogs.warnings.len(), 1);

    assert_eq!(book.report(Source::Items).unwrap().exact, 2);
    assert_eq!(book.report(Source::Npcs).unwrap().exact, 2);
    assert_eq!(book.report(Source::Quests).unwrap().exact, 1);
    assert_eq!(book.reports().len(), 4);
    assert_eq!(book.names().len(), 2);
}

#[test]
fn missing_dialog_file_fails_load() {
    let dir = TempDir::new().unwrap();
    let err = Phrasebook::load(&TranslationConfig::from_dir(dir.path())).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn dialog_path_is_required_when_enabled() {
    let err = Phrasebook::load(&TranslationConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::MissingPath { .. }));
}

#[test]
fn missing_name_source_is_left_out() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), DIALOG_FILE, DIALOGS);

    let book = Phrasebook::load(&TranslationConfig::from_dir(dir.path())).unwrap();
    assert!(book.report(Source::Items).is_none());
    assert!(book.names().is_empty());
    assert_eq!(book.translate_item_name("Prayer potion"), None);
    assert_eq!(
        book.translate_dialog("Click here to continue").as_deref(),
        Some("Cliquez ici pour continuer")
    );
}

#[test]
fn disabled_dialogs_need_no_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), NPC_FILE, NPCS);
    let config = TranslationConfig::builder()
        .npcs(dir.path().join(NPC_FILE))
        .translate_dialogs(false)
        .build();

    let book = Phrasebook::load(&config).unwrap();
    assert!(book.dialogs().is_none());
    assert_eq!(book.translate_dialog("Click here to continue"), None);
    assert_eq!(book.translate_npc_name("Cook").as_deref(), Some("Cuisinier"));
}

// =========================================================================
// Translation
// =========================================================================

#[test]
fn dialog_scenarios() {
    let dir = data_dir();
    let book = Phrasebook::load(&TranslationConfig::from_dir(dir.path())).unwrap();

    assert_eq!(
        book.translate_dialog("Talk to her about the quest.").as_deref(),
        Some("Parler à elle de the quest.")
    );
    assert_eq!(
        book.translate_dialog("You hand Bronze sword to Cook.").as_deref(),
        Some("Vous donnez Épée en bronze à Cuisinier.")
    );
    assert_eq!(book.translate_dialog("Nothing matches this"), None);
}

#[test]
fn tagged_dialog_keeps_outer_markup() {
    let dir = data_dir();
    let book = Phrasebook::load(&TranslationConfig::from_dir(dir.path())).unwrap();

    let raw = "<col=0000ff>Click here to continue</col>";
    assert_eq!(
        book.translate_dialog(raw).as_deref(),
        Some("Cliquez ici pour continuer")
    );
    assert_eq!(
        book.translate_dialog_tagged(raw).as_deref(),
        Some("<col=0000ff>Cliquez ici pour continuer</col>")
    );
}

#[test]
fn name_lookups() {
    let dir = data_dir();
    let book = Phrasebook::load(&TranslationConfig::from_dir(dir.path())).unwrap();

    assert_eq!(
        book.translate_item_name("Prayer potion(3)").as_deref(),
        Some("Potion de prière(3)")
    );
    assert_eq!(book.translate_npc_name("cook").as_deref(), Some("Cuisinier"));
    assert_eq!(
        book.translate_quest_name("Pirate\u{2019}s Treasure").as_deref(),
        Some("Le trésor du pirate")
    );
}

#[test]
fn label_prefers_npc_then_item() {
    let dir = data_dir();
    let book = Phrasebook::load(&TranslationConfig::from_dir(dir.path())).unwrap();

    assert_eq!(
        book.translate_label("<col=ffff00>Cook").as_deref(),
        Some("<col=ffff00>Cuisinier")
    );
    assert_eq!(
        book.translate_label("<col=ff9040>Prayer potion(4)</col>").as_deref(),
        Some("<col=ff9040>Potion de prière(4)</col>")
    );
    assert_eq!(
        book.translate_label("Bronze sword").as_deref(),
        Some("Never used")
    );
    assert_eq!(book.translate_label("<col=ffffff></col>"), None);
}

#[test]
fn menu_target_replaces_name_and_keeps_level() {
    let dir = data_dir();
    let book = Phrasebook::load(&TranslationConfig::from_dir(dir.path())).unwrap();

    assert_eq!(
        book.translate_menu_target("<col=ffff00>Cook<col=ff00>  (level-2)").as_deref(),
        Some("<col=ffff00>Cuisinier<col=ff00>  (level-2)")
    );
    assert_eq!(
        book.translate_menu_target("<col=ff9040>Prayer potion").as_deref(),
        Some("<col=ff9040>Potion de prière")
    );
    assert_eq!(book.translate_menu_target("Goblin  (level-5)"), None);
    assert_eq!(book.translate_menu_target(""), None);
}

#[test]
fn menu_target_respects_name_toggles() {
    let dir = data_dir();
    let without_npcs = Phrasebook::load(&TranslationConfig {
        translate_npcs: false,
        ..TranslationConfig::from_dir(dir.path())
    })
    .unwrap();
    assert_eq!(without_npcs.translate_menu_target("Cook  (level-2)"), None);
    assert_eq!(
        without_npcs.translate_menu_target("Bronze sword").as_deref(),
        Some("Épée en bronze")
    );

    let without_items = Phrasebook::load(&TranslationConfig {
        translate_items: false,
        ..TranslationConfig::from_dir(dir.path())
    })
    .unwrap();
    assert_eq!(without_items.translate_menu_target("Prayer potion"), None);
    assert_eq!(
        without_items.translate_menu_target("Cook").as_deref(),
        Some("Cuisinier")
    );
}

#[test]
fn quest_panel_labels() {
    let dir = data_dir();
    let book = Phrasebook::load(&TranslationConfig::from_dir(dir.path())).unwrap();

    assert_eq!(
        book.translate_quest_panel_label("<col=ff981f>Quest List</col>").as_deref(),
        Some("<col=ff981f>Liste des quêtes</col>")
    );
    assert_eq!(
        book.translate_quest_panel_label("Completed: 5/10").as_deref(),
        Some("Terminées: 5/10")
    );
    assert_eq!(
        book.translate_quest_panel_label("<col=ffffff>Quest Points: 12").as_deref(),
        Some("<col=ffffff>Points de quête: 12")
    );
    assert_eq!(book.translate_quest_panel_label("Completedness"), None);
    assert_eq!(book.translate_quest_panel_label("Free Quests"), None);
    assert_eq!(book.translate_quest_panel_label("<col=ffffff></col>"), None);

    let disabled = Phrasebook::load(&TranslationConfig {
        translate_quests: false,
        ..TranslationConfig::from_dir(dir.path())
    })
    .unwrap();
    assert_eq!(disabled.translate_quest_panel_label("Quest List"), None);
}

#[test]
fn toggles_gate_direct_lookups_but_not_captured_names() {
    let dir = data_dir();
    let config = TranslationConfig {
        translate_items: false,
        translate_npcs: false,
        translate_quests: false,
        ..TranslationConfig::from_dir(dir.path())
    };
    let book = Phrasebook::load(&config).unwrap();

    assert_eq!(book.translate_item_name("Prayer potion"), None);
    assert_eq!(book.translate_npc_name("Cook"), None);
    assert_eq!(book.translate_quest_name("Pirate's Treasure"), None);
    assert_eq!(book.translate_label("Cook"), None);
    assert_eq!(book.translate_menu_target("Cook  (level-2)"), None);
    assert_eq!(book.translate_quest_panel_label("Quest List"), None);
    assert_eq!(
        book.translate_dialog("You hand Bronze sword to Cook.").as_deref(),
        Some("Vous donnez Épée en bronze à Cuisinier.")
    );
}

#[test]
fn suggestions_for_near_miss() {
    let dir = data_dir();
    let book = Phrasebook::load(&TranslationConfig::from_dir(dir.path())).unwrap();
    assert_eq!(
        book.suggestions("Click here to contine"),
        vec!["click here to continue".to_string()]
    );
    assert!(book.suggestions("Completely different").is_empty());
}

// =========================================================================
// Shared initialization
// =========================================================================

#[test]
fn shared_loads_once_and_reuses() {
    let dir = data_dir();
    let shared = SharedPhrasebook::new(TranslationConfig::from_dir(dir.path()));
    assert!(!shared.is_initialized());

    let first = shared.get().unwrap() as *const Phrasebook;
    assert!(shared.is_initialized());
    let second = shared.get().unwrap() as *const Phrasebook;
    assert_eq!(first, second);
}

#[test]
fn shared_failure_is_permanent() {
    let dir = TempDir::new().unwrap();
    let shared = SharedPhrasebook::new(TranslationConfig::from_dir(dir.path()));

    assert!(!shared.is_initialized());
    assert!(shared.get().is_err());
    assert!(shared.is_initialized());
    assert_eq!(shared.translate_dialog("Click here to continue"), None);

    // The file appearing later does not trigger a reload.
    write(dir.path(), DIALOG_FILE, DIALOGS);
    assert!(shared.get().is_err());
    assert_eq!(shared.translate_dialog("Click here to continue"), None);
}

#[test]
fn concurrent_first_callers_see_one_instance() {
    let dir = data_dir();
    let shared = Arc::new(SharedPhrasebook::new(TranslationConfig::from_dir(dir.path())));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let book = shared.get().unwrap();
                (
                    book as *const Phrasebook as usize,
                    book.translate_dialog("Talk to him about cake."),
                )
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let address = results[0].0;
    for (seen, translated) in results {
        assert_eq!(seen, address);
        assert_eq!(translated.as_deref(), Some("Parler à lui de cake."));
    }
}
