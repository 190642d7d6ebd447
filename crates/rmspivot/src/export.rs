//! Workbook export: one CSV sheet per pivot table.
//!
//! A "workbook" is a directory of per-sheet CSV files, so the output
//! opens anywhere a spreadsheet import does. Sheet names keep the
//! spreadsheet constraints (31 characters, no `[ ] : * ? / \`) so the
//! files re-import cleanly as worksheet tabs.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rmspivot_core::PivotTable;
use tracing::{debug, info};

use crate::error::CliError;

/// Spreadsheet worksheet names cap at 31 characters.
const MAX_SHEET_NAME: usize = 31;

/// Replace characters spreadsheet tools reject in sheet names and
/// truncate to the 31-character worksheet limit.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    cleaned.chars().take(MAX_SHEET_NAME).collect()
}

/// Write each named pivot table as `<out>/<sheet>.csv`.
///
/// Sheet names are sanitized first; collisions after truncation get a
/// numeric suffix so no sheet silently overwrites another. The numeric
/// rows are written as-is with the Total row last — display blanking is
/// a terminal affordance and does not belong in exported data.
pub fn write_workbook(
    out: &Path,
    sheets: &[(String, &PivotTable)],
) -> Result<Vec<PathBuf>, CliError> {
    fs::create_dir_all(out).map_err(|err| CliError::ExportFailed {
        path: out.display().to_string(),
        message: err.to_string(),
    })?;

    let mut used = HashSet::new();
    let mut written = Vec::with_capacity(sheets.len());

    for (name, table) in sheets {
        let sheet = unique_sheet_name(&sanitize_sheet_name(name), &mut used);
        let path = out.join(format!("{sheet}.csv"));
        write_sheet(&path, table)?;
        debug!(sheet = %sheet, rows = table.rows().len(), "wrote sheet");
        written.push(path);
    }

    info!(sheets = written.len(), out = %out.display(), "workbook written");
    Ok(written)
}

fn unique_sheet_name(base: &str, used: &mut HashSet<String>) -> String {
    if used.insert(base.to_owned()) {
        return base.to_owned();
    }
    for n in 2.. {
        let suffix = format!(" {n}");
        let stem: String = base
            .chars()
            .take(MAX_SHEET_NAME.saturating_sub(suffix.len()))
            .collect();
        let candidate = format!("{stem}{suffix}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
    }
    unreachable!("suffix search is unbounded")
}

fn write_sheet(path: &Path, table: &PivotTable) -> Result<(), CliError> {
    let fail = |err: csv::Error| CliError::ExportFailed {
        path: path.display().to_string(),
        message: err.to_string(),
    };

    let mut writer = csv::Writer::from_path(path).map_err(fail)?;

    let mut header: Vec<String> = table.key_columns().to_vec();
    header.extend(table.value_columns().iter().cloned());
    writer.write_record(&header).map_err(fail)?;

    for row in table.rows().iter().chain(std::iter::once(table.total_row())) {
        let mut record = row.keys.clone();
        for column in table.value_columns() {
            record.push(row.cell(column).to_string());
        }
        writer.write_record(&record).map_err(fail)?;
    }

    writer.flush().map_err(|err| CliError::ExportFailed {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    Ok(())
}
