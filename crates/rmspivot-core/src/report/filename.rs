//! Report-filename timestamp extraction.
//!
//! Upload filenames from the RMS portal embed a capture time in a
//! parenthetical, e.g. `"Report (September 28th 2024, 2_46_02 pm).xlsx"`:
//! the day carries an ordinal suffix and the time uses underscores instead
//! of colons. A filename that doesn't match degrades to `None` (rendered
//! as an "Unknown Time" placeholder), never an error.

use chrono::NaiveDateTime;

use crate::extract::first_parenthetical;

/// Placeholder label when no timestamp can be extracted.
pub const UNKNOWN_TIME: &str = "Unknown Time";

/// Chrono format of the cleaned-up parenthetical.
pub const FILENAME_TIME_FORMAT: &str = "%B %d %Y, %I:%M:%S %p";

/// Extract the capture timestamp embedded in an upload filename.
pub fn report_timestamp(filename: &str) -> Option<NaiveDateTime> {
    let raw = first_parenthetical(filename)?;
    let cleaned = strip_day_ordinal(raw).replace('_', ":");
    NaiveDateTime::parse_from_str(&cleaned, FILENAME_TIME_FORMAT).ok()
}

/// The timestamp as a display label, with the placeholder fallback.
pub fn report_timestamp_label(filename: &str) -> String {
    report_timestamp(filename).map_or_else(
        || UNKNOWN_TIME.to_owned(),
        |ts| ts.format("%B %d %Y, %I:%M:%S %p").to_string(),
    )
}

/// Remove an ordinal suffix (st/nd/rd/th) from any all-digit word:
/// `"September 28th 2024"` becomes `"September 28 2024"`.
fn strip_day_ordinal(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let lower = word.to_ascii_lowercase();
            for suffix in ["st", "nd", "rd", "th"] {
                if let Some(stem) = lower.strip_suffix(suffix) {
                    if !stem.is_empty() && stem.bytes().all(|b| b.is_ascii_digit()) {
                        return &word[..stem.len()];
                    }
                }
            }
            word
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn extracts_portal_filename_timestamp() {
        let ts = report_timestamp("All Door Open Alarms (September 28th 2024, 2_46_02 pm).xlsx");
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2024, 9, 28).and_then(|d| d.and_hms_opt(14, 46, 2))
        );
    }

    #[test]
    fn ordinal_variants_all_strip() {
        for (day, name) in [(1, "1st"), (2, "2nd"), (3, "3rd"), (4, "4th"), (21, "21st")] {
            let filename = format!("Report (January {name} 2025, 9_05_00 am).xlsx");
            let ts = report_timestamp(&filename);
            assert_eq!(
                ts,
                NaiveDate::from_ymd_opt(2025, 1, day).and_then(|d| d.and_hms_opt(9, 5, 0)),
                "failed for {name}"
            );
        }
    }

    #[test]
    fn malformed_filenames_degrade_to_none() {
        assert_eq!(report_timestamp("report.xlsx"), None);
        assert_eq!(report_timestamp("report (draft).xlsx"), None);
        assert_eq!(report_timestamp_label("report.xlsx"), UNKNOWN_TIME);
    }

    #[test]
    fn words_ending_in_suffix_letters_are_left_alone() {
        // "August" ends in "st" but isn't a day number.
        let ts = report_timestamp("Report (August 3rd 2024, 11_59_59 pm).xlsx");
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2024, 8, 3).and_then(|d| d.and_hms_opt(23, 59, 59))
        );
    }
}
