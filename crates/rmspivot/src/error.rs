//! CLI error types with miette diagnostics.
//!
//! Maps `ReportError` / `ConfigError` into user-facing errors with
//! actionable help text. Zero matching rows is never an error — empty
//! pivots render as empty tables with total 0.

use miette::Diagnostic;
use thiserror::Error;

use rmspivot_core::ReportError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const REPORT: i32 = 3;
    pub const EXPORT: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Report ingestion ─────────────────────────────────────────────

    #[error("Cannot read report '{path}': {reason}")]
    #[diagnostic(
        code(rmspivot::report_unreadable),
        help("Check that the file exists and is a CSV export from the RMS portal.")
    )]
    ReportUnreadable { path: String, reason: String },

    #[error("Report '{path}' is missing required column(s): {columns}")]
    #[diagnostic(
        code(rmspivot::missing_columns),
        help(
            "The export must keep the portal's column headers on the third row.\n\
             Nothing was aggregated from this report."
        )
    )]
    MissingColumns { path: String, columns: String },

    #[error("Report '{path}' is malformed: {message}")]
    #[diagnostic(
        code(rmspivot::malformed_report),
        help("Re-download the export; the CSV structure could not be parsed.")
    )]
    MalformedReport { path: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(rmspivot::validation))]
    Validation { field: String, reason: String },

    // ── Export ───────────────────────────────────────────────────────

    #[error("Failed to write workbook to '{path}': {message}")]
    #[diagnostic(
        code(rmspivot::export_failed),
        help(
            "The pivot tables were built successfully; only the export step failed.\n\
             View them with: rmspivot alarms pivot <FILE>"
        )
    )]
    ExportFailed { path: String, message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration error: {0}")]
    #[diagnostic(code(rmspivot::config))]
    Config(#[from] rmspivot_config::ConfigError),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ReportUnreadable { .. }
            | Self::MissingColumns { .. }
            | Self::MalformedReport { .. } => exit_code::REPORT,
            Self::ExportFailed { .. } => exit_code::EXPORT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the offending report path to a core `ReportError`.
    pub fn from_report(err: ReportError, path: &std::path::Path) -> Self {
        let path = path.display().to_string();
        match err {
            ReportError::Io { source, .. } => Self::ReportUnreadable {
                path,
                reason: source.to_string(),
            },
            ReportError::MissingColumns { columns } => Self::MissingColumns {
                path,
                columns: columns.join(", "),
            },
            ReportError::NoHeaderRow => Self::MalformedReport {
                path,
                message: "no header row found (expected column headers on row 3)".into(),
            },
            ReportError::Malformed { row, message } => Self::MalformedReport {
                path,
                message: format!("row {row}: {message}"),
            },
        }
    }
}
