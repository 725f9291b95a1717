//! Implementation of the `phrasebook check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Report, Result, miette};
use phrasebook::{LoadReport, TranslationTable};
use serde::Serialize;

use crate::output::WarningDiagnostic;
use crate::output::table::{FileSummary, format_check_table};

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Data files to check (english|french per line)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with non-zero code if any file has warnings
    #[arg(long)]
    pub strict: bool,
}

/// JSON output format for one checked file.
#[derive(Debug, Serialize)]
struct CheckJson<'a> {
    file: String,
    #[serde(flatten)]
    report: &'a LoadReport,
}

struct CheckedFile {
    path: PathBuf,
    content: String,
    report: LoadReport,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let mut checked = Vec::new();
    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read data file {}: {}", path.display(), e))?;
        let (_, report) = TranslationTable::load_str(&content);
        tracing::debug!(file = %path.display(), loaded = report.loaded(), "checked data file");
        checked.push(CheckedFile {
            path: path.clone(),
            content,
            report,
        });
    }

    let any_warnings = checked.iter().any(|c| !c.report.warnings.is_empty());

    if args.json {
        let json_data: Vec<CheckJson<'_>> = checked
            .iter()
            .map(|c| CheckJson {
                file: c.path.display().to_string(),
                report: &c.report,
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{json_output}");
    } else {
        let summaries: Vec<FileSummary> = checked
            .iter()
            .map(|c| FileSummary {
                file: c.path.display().to_string(),
                exact: c.report.exact,
                rules: c.report.rules,
                warnings: c.report.warnings.len(),
            })
            .collect();
        println!("{}", format_check_table(&summaries));

        for file in &checked {
            for warning in &file.report.warnings {
                let diagnostic =
                    WarningDiagnostic::from_load_warning(&file.path, &file.content, warning);
                eprintln!("{:?}", Report::new(diagnostic));
            }
        }
    }

    if args.strict && any_warnings {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
