//! Shared helpers for command handlers.

use std::path::Path;

use chrono::{DateTime, Local, NaiveDateTime};
use rmspivot_core::{AlarmReport, OfflineReport, ParseWarnings, report};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the reference clock for elapsed-offline classification.
///
/// `--reference-time` (RFC 3339) pins the clock for reproducible runs;
/// otherwise the local wall clock is used.
pub fn reference_time(global: &GlobalOpts) -> Result<NaiveDateTime, CliError> {
    match global.reference_time.as_deref() {
        None => Ok(Local::now().naive_local()),
        Some(text) => DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.naive_local())
            .map_err(|e| CliError::Validation {
                field: "reference-time".into(),
                reason: format!("expected RFC 3339 timestamp: {e}"),
            }),
    }
}

/// Load an alarm report, attaching the path to any failure.
pub fn load_alarm_report(path: &Path) -> Result<AlarmReport, CliError> {
    report::read_alarm_report(path).map_err(|e| CliError::from_report(e, path))
}

/// Load an offline report, attaching the path to any failure.
pub fn load_offline_report(
    path: &Path,
    reference: NaiveDateTime,
) -> Result<OfflineReport, CliError> {
    report::read_offline_report(path, reference).map_err(|e| CliError::from_report(e, path))
}

/// Surface per-report parse warnings once, on stderr.
pub fn report_warnings(warnings: ParseWarnings, quiet: bool) {
    if quiet || warnings.is_clean() {
        return;
    }
    if warnings.bad_timestamps > 0 {
        eprintln!(
            "warning: {} timestamp cell(s) could not be parsed",
            warnings.bad_timestamps
        );
    }
    if warnings.bad_durations > 0 {
        eprintln!(
            "warning: {} duration cell(s) could not be parsed",
            warnings.bad_durations
        );
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
