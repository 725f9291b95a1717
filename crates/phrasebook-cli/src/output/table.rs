//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};

/// Load summary for a single data file.
pub struct FileSummary {
    /// Path of the file as given on the command line.
    pub file: String,
    /// Lines stored as exact entries.
    pub exact: usize,
    /// Lines compiled into template rules.
    pub rules: usize,
    /// Number of load warnings.
    pub warnings: usize,
}

/// Format load summaries as an ASCII table.
pub fn format_check_table(summaries: &[FileSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Exact", "Rules", "Warnings"]);

    for summary in summaries {
        table.add_row(vec![
            summary.file.clone(),
            summary.exact.to_string(),
            summary.rules.to_string(),
            summary.warnings.to_string(),
        ]);
    }

    table
}
