//! Implementation of the `phrasebook translate` command.

use std::fs::read_to_string;
use std::io::{BufRead, stdin};
use std::path::{Path, PathBuf};

use clap::Args;
use miette::{IntoDiagnostic, Result, miette};
use owo_colors::{OwoColorize, Stream};
use phrasebook::{Phrasebook, TranslationConfig};
use serde::Serialize;

/// Arguments for the translate command.
#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Directory holding dialog_french.txt and the name files
    #[arg(long, conflicts_with = "config")]
    pub data_dir: Option<PathBuf>,

    /// JSON configuration file with source paths and toggles
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Text to translate. Lines are read from stdin when omitted.
    pub text: Vec<String>,

    /// Keep the outer markup of the input around the translation
    #[arg(long)]
    pub keep_tags: bool,

    /// List close dialog entries for text that was not translated
    #[arg(long)]
    pub suggest: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one translated input.
#[derive(Debug, Serialize)]
pub struct TranslateResult {
    pub input: String,
    pub output: String,
    pub translated: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// Build the configuration from `--config`, `--data-dir`, or the current
/// directory.
fn load_config(args: &TranslateArgs) -> Result<TranslationConfig> {
    if let Some(path) = &args.config {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read config file {}: {}", path.display(), e))?;
        return serde_json::from_str(&content)
            .into_diagnostic()
            .map_err(|e| miette!("Invalid config file {}: {}", path.display(), e));
    }

    let dir = args.data_dir.as_deref().unwrap_or_else(|| Path::new("."));
    Ok(TranslationConfig::from_dir(dir))
}

fn read_inputs(args: &TranslateArgs) -> Result<Vec<String>> {
    if !args.text.is_empty() {
        return Ok(args.text.clone());
    }
    stdin()
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .into_diagnostic()
        .map_err(|e| miette!("Failed to read stdin: {}", e))
}

/// Translate one input. Untranslated text is returned unchanged.
fn translate_one(book: &Phrasebook, input: String, args: &TranslateArgs) -> TranslateResult {
    let french = if args.keep_tags {
        book.translate_dialog_tagged(&input)
    } else {
        book.translate_dialog(&input)
    };

    match french {
        Some(output) => TranslateResult {
            input,
            output,
            translated: true,
            suggestions: Vec::new(),
        },
        None => {
            let suggestions = if args.suggest {
                book.suggestions(&input)
            } else {
                Vec::new()
            };
            TranslateResult {
                output: input.clone(),
                input,
                translated: false,
                suggestions,
            }
        }
    }
}

/// Run the translate command.
pub fn run_translate(args: TranslateArgs) -> Result<i32> {
    let config = load_config(&args)?;
    let book = Phrasebook::load(&config)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to load translations: {}", e))?;

    let results: Vec<TranslateResult> = read_inputs(&args)?
        .into_iter()
        .map(|input| translate_one(&book, input, &args))
        .collect();

    if args.json {
        let json_output = serde_json::to_string_pretty(&results).into_diagnostic()?;
        println!("{json_output}");
        return Ok(exitcode::OK);
    }

    for result in &results {
        if result.translated {
            println!("{}", result.output);
        } else {
            println!(
                "{}",
                result
                    .output
                    .if_supports_color(Stream::Stdout, |text| text.dimmed())
            );
        }

        if !result.suggestions.is_empty() {
            eprintln!(
                "  {} {}",
                "did you mean:".if_supports_color(Stream::Stderr, |text| text.yellow()),
                result.suggestions.join(", ")
            );
        }
    }

    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn args(dir: &Path) -> TranslateArgs {
        TranslateArgs {
            data_dir: Some(dir.to_path_buf()),
            config: None,
            text: Vec::new(),
            keep_tags: false,
            suggest: false,
            json: false,
        }
    }

    fn book(dir: &Path) -> Phrasebook {
        fs::write(
            dir.join("dialog_french.txt"),
            "Click here to continue|Cliquez ici pour continuer\n",
        )
        .unwrap();
        Phrasebook::load(&TranslationConfig::from_dir(dir)).unwrap()
    }

    #[test]
    fn translated_input() {
        let dir = TempDir::new().unwrap();
        let book = book(dir.path());
        let result = translate_one(&book, "Click here to continue".into(), &args(dir.path()));
        assert!(result.translated);
        assert_eq!(result.output, "Cliquez ici pour continuer");
    }

    #[test]
    fn keep_tags_wraps_output() {
        let dir = TempDir::new().unwrap();
        let book = book(dir.path());
        let args = TranslateArgs {
            keep_tags: true,
            ..args(dir.path())
        };
        let result = translate_one(&book, "<col=ff0000>Click here to continue".into(), &args);
        assert_eq!(result.output, "<col=ff0000>Cliquez ici pour continuer");
    }

    #[test]
    fn untranslated_input_is_kept_with_suggestions() {
        let dir = TempDir::new().unwrap();
        let book = book(dir.path());
        let args = TranslateArgs {
            suggest: true,
            ..args(dir.path())
        };
        let result = translate_one(&book, "Click here to contnue".into(), &args);
        assert!(!result.translated);
        assert_eq!(result.output, "Click here to contnue");
        assert_eq!(result.suggestions, vec!["click here to continue"]);
    }

    #[test]
    fn config_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("phrasebook.json");
        fs::write(&path, r#"{ "dialogs": "d.txt", "translate_npcs": false }"#).unwrap();
        let args = TranslateArgs {
            data_dir: None,
            config: Some(path),
            ..args(dir.path())
        };

        let config = load_config(&args).unwrap();
        assert_eq!(config.dialogs, Some(PathBuf::from("d.txt")));
        assert!(!config.translate_npcs);
    }
}
