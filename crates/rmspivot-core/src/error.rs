// ── Core error types ──
//
// User-facing errors from report ingestion. Per-row problems are NOT
// errors -- unparseable cells recover locally and are tallied into
// `ParseWarnings`. Only report-level failures (unreadable file, missing
// required columns, structurally broken CSV) surface here, and none of
// them poison a later report: each invocation starts clean.

use std::path::PathBuf;

use thiserror::Error;

/// Report-level ingestion failures.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent. Processing aborts for the whole
    /// report; no partial aggregation is attempted.
    #[error("missing required column(s): {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// The file ended before the header row (headers live on the third
    /// physical row; the two leading rows are title/metadata).
    #[error("report has no header row (expected column headers on row 3)")]
    NoHeaderRow,

    /// The CSV itself is structurally broken (unbalanced quotes etc.).
    #[error("malformed report at row {row}: {message}")]
    Malformed { row: usize, message: String },
}
