//! Report ingestion.
//!
//! Source exports are CSV with a fixed quirk: the first two physical rows
//! are title/metadata and the third row carries the column headers. Header
//! validation is strict (a missing required column aborts the report);
//! cell parsing is lenient (a bad timestamp or hour value recovers to
//! `None` and bumps a warning counter).

pub mod filename;

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};

use crate::error::ReportError;
use crate::model::{AlarmRecord, OfflineBucket, OfflineRecord};

/// Timestamp format used by the RMS exports, e.g. `28/09/2024 02:46:02 PM`.
pub const REPORT_TIME_FORMAT: &str = "%d/%m/%Y %I:%M:%S %p";

/// Zero-based index of the header row (third physical row).
pub const HEADER_ROW: usize = 2;

/// Required columns for an alarm report.
pub const ALARM_REQUIRED_COLUMNS: [&str; 5] =
    ["RMS Station", "Cluster", "Zone", "Site Alias", "Alarm Name"];

/// Optional alarm columns: present in most exports, absent in some.
pub const ALARM_TIME_COLUMN: &str = "Alarm Time";
pub const DURATION_COLUMN: &str = "Duration Slot (Hours)";

/// Required columns for an offline report.
pub const OFFLINE_REQUIRED_COLUMNS: [&str; 5] =
    ["Cluster", "Zone", "Site Alias", "Last Online Time", "Duration"];

/// Per-report tallies of cells that failed to parse and were recovered
/// locally. Reported once per report, never per cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ParseWarnings {
    pub bad_timestamps: usize,
    pub bad_durations: usize,
}

impl ParseWarnings {
    pub fn is_clean(self) -> bool {
        self.bad_timestamps == 0 && self.bad_durations == 0
    }

    pub fn total(self) -> usize {
        self.bad_timestamps + self.bad_durations
    }
}

/// A parsed alarm report.
#[derive(Debug, Clone)]
pub struct AlarmReport {
    pub records: Vec<AlarmRecord>,
    pub warnings: ParseWarnings,
}

/// A parsed offline report.
#[derive(Debug, Clone)]
pub struct OfflineReport {
    pub records: Vec<OfflineRecord>,
    pub warnings: ParseWarnings,
}

// ── Header handling ─────────────────────────────────────────────────

/// Column-name -> index lookup built from the header row.
struct Header {
    index: HashMap<String, usize>,
}

impl Header {
    fn parse(row: &StringRecord, required: &[&str]) -> Result<Self, ReportError> {
        let mut index = HashMap::new();
        for (i, name) in row.iter().enumerate() {
            index.entry(name.trim().to_owned()).or_insert(i);
        }

        let missing: Vec<String> = required
            .iter()
            .filter(|c| !index.contains_key(**c))
            .map(|c| (*c).to_owned())
            .collect();
        if !missing.is_empty() {
            return Err(ReportError::MissingColumns { columns: missing });
        }

        Ok(Self { index })
    }

    fn field<'a>(&self, row: &'a StringRecord, column: &str) -> &'a str {
        self.index
            .get(column)
            .and_then(|i| row.get(*i))
            .unwrap_or("")
            .trim()
    }
}

/// Read the rows of a report body, skipping the two title rows and
/// validating the header against `required`.
fn read_rows<R: Read>(
    reader: R,
    required: &[&str],
) -> Result<(Header, Vec<StringRecord>), ReportError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut header = None;
    let mut rows = Vec::new();

    for (idx, result) in csv.records().enumerate() {
        let row = result.map_err(|e| ReportError::Malformed {
            row: idx + 1,
            message: e.to_string(),
        })?;

        if idx < HEADER_ROW {
            continue; // title/metadata rows
        }
        if idx == HEADER_ROW {
            header = Some(Header::parse(&row, required)?);
            continue;
        }
        // Trailing blank lines are export artifacts, not data.
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(row);
    }

    let header = header.ok_or(ReportError::NoHeaderRow)?;
    Ok((header, rows))
}

// ── Cell parsing ────────────────────────────────────────────────────

fn parse_timestamp(cell: &str, warnings: &mut ParseWarnings) -> Option<NaiveDateTime> {
    if cell.is_empty() {
        return None;
    }
    match NaiveDateTime::parse_from_str(cell, REPORT_TIME_FORMAT) {
        Ok(ts) => Some(ts),
        Err(_) => {
            warnings.bad_timestamps += 1;
            None
        }
    }
}

fn parse_hours(cell: &str, warnings: &mut ParseWarnings) -> Option<f64> {
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(hours) => Some(hours),
        Err(_) => {
            warnings.bad_durations += 1;
            None
        }
    }
}

// ── Alarm reports ───────────────────────────────────────────────────

/// Parse an alarm report from any reader.
pub fn parse_alarm_report<R: Read>(reader: R) -> Result<AlarmReport, ReportError> {
    let (header, rows) = read_rows(reader, &ALARM_REQUIRED_COLUMNS)?;

    let mut warnings = ParseWarnings::default();
    let records = rows
        .iter()
        .map(|row| AlarmRecord {
            station: header.field(row, "RMS Station").to_owned(),
            cluster: header.field(row, "Cluster").to_owned(),
            zone: header.field(row, "Zone").to_owned(),
            site_alias: header.field(row, "Site Alias").to_owned(),
            alarm_name: header.field(row, "Alarm Name").to_owned(),
            alarm_time: parse_timestamp(header.field(row, ALARM_TIME_COLUMN), &mut warnings),
            duration_hours: parse_hours(header.field(row, DURATION_COLUMN), &mut warnings),
        })
        .collect();

    let report = AlarmReport { records, warnings };
    tracing::debug!(
        records = report.records.len(),
        bad_cells = warnings.total(),
        "parsed alarm report"
    );
    Ok(report)
}

/// Read an alarm report from disk.
pub fn read_alarm_report(path: &Path) -> Result<AlarmReport, ReportError> {
    let file = File::open(path).map_err(|source| ReportError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_alarm_report(file)
}

// ── Offline reports ─────────────────────────────────────────────────

/// Parse an offline report from any reader.
///
/// The duration bucket prefers the export's free-text `Duration` label
/// (exact membership test, see [`OfflineBucket::from_text`]); when the
/// label is absent or unrecognized it is computed from elapsed time
/// against `reference`. A row with neither counts toward site totals but
/// no bucket, and bumps the duration warning tally.
pub fn parse_offline_report<R: Read>(
    reader: R,
    reference: NaiveDateTime,
) -> Result<OfflineReport, ReportError> {
    let (header, rows) = read_rows(reader, &OFFLINE_REQUIRED_COLUMNS)?;

    let mut warnings = ParseWarnings::default();
    let records = rows
        .iter()
        .map(|row| {
            let last_online =
                parse_timestamp(header.field(row, "Last Online Time"), &mut warnings);

            let duration_text = header.field(row, "Duration");
            let bucket = OfflineBucket::from_text(duration_text).or_else(|| {
                last_online.map(|ts| {
                    let (hours, _) = crate::extract::classify_elapsed_offline(reference, ts);
                    OfflineBucket::from_hours(hours)
                })
            });
            if bucket.is_none() {
                warnings.bad_durations += 1;
            }

            OfflineRecord {
                cluster: header.field(row, "Cluster").to_owned(),
                zone: header.field(row, "Zone").to_owned(),
                site_alias: header.field(row, "Site Alias").to_owned(),
                last_online,
                bucket,
            }
        })
        .collect();

    let report = OfflineReport { records, warnings };
    tracing::debug!(
        records = report.records.len(),
        bad_cells = warnings.total(),
        "parsed offline report"
    );
    Ok(report)
}

/// Read an offline report from disk.
pub fn read_offline_report(
    path: &Path,
    reference: NaiveDateTime,
) -> Result<OfflineReport, ReportError> {
    let file = File::open(path).map_err(|source| ReportError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_offline_report(file, reference)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    const ALARM_CSV: &str = "\
RMS Alarm Report,,,,,,
Generated 28/09/2024,,,,,,
RMS Station,Cluster,Zone,Site Alias,Alarm Name,Alarm Time,Duration Slot (Hours)
R-0001,A,Zone-1,Tower-1 (GP),Door Open,28/09/2024 02:46:02 PM,1.5
R-0002,A,Zone-1,Tower-2 (Robi),Mains Fail,28/09/2024 11:00:00 AM,2.0
L-0003,B,Zone-4,Tower-3 (GP),Door Open,not a time,abc
";

    #[test]
    fn alarm_report_parses_rows_and_cells() {
        let report = parse_alarm_report(ALARM_CSV.as_bytes()).expect("parse");
        assert_eq!(report.records.len(), 3);

        let first = &report.records[0];
        assert_eq!(first.station, "R-0001");
        assert_eq!(first.client(), Some("GP"));
        assert_eq!(first.duration_hours, Some(1.5));
        assert_eq!(
            first.alarm_time,
            NaiveDate::from_ymd_opt(2024, 9, 28)
                .and_then(|d| d.and_hms_opt(14, 46, 2))
        );
    }

    #[test]
    fn alarm_report_recovers_bad_cells_with_warnings() {
        let report = parse_alarm_report(ALARM_CSV.as_bytes()).expect("parse");
        let broken = &report.records[2];
        assert_eq!(broken.alarm_time, None);
        assert_eq!(broken.duration_hours, None);
        assert_eq!(report.warnings.bad_timestamps, 1);
        assert_eq!(report.warnings.bad_durations, 1);
        assert!(!report.warnings.is_clean());
    }

    #[test]
    fn missing_columns_abort_the_report() {
        let csv = "\
title,,
meta,,
RMS Station,Cluster,Alarm Name
R-1,A,Door Open
";
        let err = parse_alarm_report(csv.as_bytes()).expect_err("must fail");
        match err {
            ReportError::MissingColumns { columns } => {
                assert_eq!(columns, vec!["Zone".to_owned(), "Site Alias".to_owned()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn truncated_file_has_no_header_row() {
        let err = parse_alarm_report("just a title\n".as_bytes()).expect_err("must fail");
        assert!(matches!(err, ReportError::NoHeaderRow));
    }

    #[test]
    fn offline_report_buckets_from_text_and_elapsed() {
        let csv = "\
Offline Report,,,,
,,,,
Cluster,Zone,Site Alias,Last Online Time,Duration
A,Zone-1,Tower-1,27/09/2024 02:00:00 PM,Less than 24 hours
A,Zone-1,Tower-2,24/09/2024 02:00:00 PM,
B,Zone-2,Tower-3,,weird label
";
        let reference = NaiveDate::from_ymd_opt(2024, 9, 28)
            .and_then(|d| d.and_hms_opt(14, 0, 0))
            .expect("valid reference");
        let report = parse_offline_report(csv.as_bytes(), reference).expect("parse");

        assert_eq!(report.records[0].bucket, Some(OfflineBucket::Under24));
        // No label: 4 days elapsed resolves to the 72h+ bucket.
        assert_eq!(report.records[1].bucket, Some(OfflineBucket::Over72));
        // Neither label nor timestamp: no bucket, tallied as a warning.
        assert_eq!(report.records[2].bucket, None);
        assert_eq!(report.warnings.bad_durations, 1);
        assert_eq!(report.warnings.bad_timestamps, 1);
    }

    #[test]
    fn blank_trailing_rows_are_skipped() {
        let csv = format!("{ALARM_CSV},,,,,,\n,,,,,,\n");
        let report = parse_alarm_report(csv.as_bytes()).expect("parse");
        assert_eq!(report.records.len(), 3);
    }
}
