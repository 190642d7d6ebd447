//! Pure field extractors.
//!
//! Derived fields are parsed out of raw report text: the client/tenant tag
//! from a composite site label, an active-alarm hour count into its fixed
//! bucket, and elapsed-offline time into a human unit. No I/O, no shared
//! state; callers pass the reference clock explicitly.

use chrono::NaiveDateTime;

use crate::model::DurationBucket;

/// The contents of the first parenthesized substring of `text`, if any.
///
/// Shared by client extraction and report-filename timestamp parsing,
/// which both encode their payload as a parenthetical.
pub fn first_parenthetical(text: &str) -> Option<&str> {
    let start = text.find('(')?;
    let rest = &text[start + 1..];
    let end = rest.find(')')?;
    Some(&rest[..end])
}

/// Extract the client/tenant identifier from a composite site label.
///
/// `"Tower-9 (GP)"` yields `Some("GP")`; a label with no parenthetical
/// yields `None` — absence is not an error, the record is simply
/// unclassifiable. With multiple parentheticals the first wins.
pub fn extract_client(label: &str) -> Option<&str> {
    first_parenthetical(label)
}

/// Classify an active-alarm duration (hours) into its bucket.
///
/// Partitions are half-open and exclusive at the upper end: `[0, 2)`,
/// `[2, 4)`, `[4, 8)`, `[8, ∞)`. Anything outside — negative values,
/// NaN from a coerced sentinel — is `Unknown`.
pub fn classify_duration_hours(hours: f64) -> DurationBucket {
    if (0.0..2.0).contains(&hours) {
        DurationBucket::ZeroPlus
    } else if (2.0..4.0).contains(&hours) {
        DurationBucket::TwoPlus
    } else if (4.0..8.0).contains(&hours) {
        DurationBucket::FourPlus
    } else if hours >= 8.0 {
        DurationBucket::EightPlus
    } else {
        DurationBucket::Unknown
    }
}

/// Compute elapsed time since a site went offline and render it as a
/// coarse human label: whole minutes under an hour, whole hours under a
/// day, whole days beyond.
///
/// Returns the raw elapsed hours alongside the label. The value may be
/// negative when source logs carry clock skew — that is reported as
/// computed, not rejected. This is a distinct, coarser scheme from
/// [`classify_duration_hours`]; the two are not interchangeable.
pub fn classify_elapsed_offline(
    reference: NaiveDateTime,
    last_online: NaiveDateTime,
) -> (f64, String) {
    let seconds = reference.signed_duration_since(last_online).num_seconds();
    #[allow(clippy::cast_precision_loss)]
    let hours = seconds as f64 / 3600.0;

    let label = if hours < 1.0 {
        format!("{} minutes", (hours * 60.0).floor() as i64)
    } else if hours < 24.0 {
        format!("{} hours", hours.floor() as i64)
    } else {
        format!("{} days", (hours / 24.0).floor() as i64)
    };

    (hours, label)
}
