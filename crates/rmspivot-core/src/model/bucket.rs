// ── Categorical duration buckets ──
//
// Two distinct schemes live here. `DurationBucket` classifies how long an
// alarm condition has been active (the `Duration Slot (Hours)` column).
// `OfflineBucket` classifies how long a site has been offline. They share
// nothing but the word "duration" and must never be conflated.

use serde::{Deserialize, Serialize};

/// Active-alarm duration bucket, derived from a numeric hour value.
///
/// Boundaries are half-open: `[0, 2)`, `[2, 4)`, `[4, 8)`, `[8, ∞)`.
/// Exactly 2.0 hours falls in `2+`, not `0+`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum DurationBucket {
    #[strum(serialize = "0+")]
    ZeroPlus,
    #[strum(serialize = "2+")]
    TwoPlus,
    #[strum(serialize = "4+")]
    FourPlus,
    #[strum(serialize = "8+")]
    EightPlus,
    /// Negative or non-numeric input. Not a pivot column.
    #[strum(serialize = "Unknown")]
    Unknown,
}

impl DurationBucket {
    /// The four fixed pivot columns, in display order. `Unknown` is
    /// excluded: records that cannot be classified are dropped from
    /// duration aggregation rather than given a column.
    pub const COLUMNS: [Self; 4] = [Self::ZeroPlus, Self::TwoPlus, Self::FourPlus, Self::EightPlus];

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Offline-duration bucket for outage reports.
///
/// Source exports carry this as free text; numeric feeds carry elapsed
/// hours. Both are normalized to this enum at ingestion so the pivot
/// never does substring matching.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum OfflineBucket {
    #[strum(serialize = "Less than 24 hours")]
    Under24,
    #[strum(serialize = "More than 24 hours")]
    Over24,
    #[strum(serialize = "More than 48 hours")]
    Over48,
    #[strum(serialize = "More than 72 hours")]
    Over72,
}

impl OfflineBucket {
    /// The four pivot columns, in display order.
    pub const COLUMNS: [Self; 4] = [Self::Under24, Self::Over24, Self::Over48, Self::Over72];

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Classify a free-text duration label from the source export.
    ///
    /// The source labels are not mutually exclusive substrings: longer
    /// outage phrasings still contain "More than 24 hours", so the 24h
    /// test has to reject anything that also mentions "72". That
    /// membership test is preserved here verbatim.
    pub fn from_text(text: &str) -> Option<Self> {
        if text.contains("Less than 24 hours") {
            return Some(Self::Under24);
        }
        if text.contains("More than 72 hours") {
            return Some(Self::Over72);
        }
        if text.contains("More than 48 hours") {
            return Some(Self::Over48);
        }
        if text.contains("More than 24 hours") && !text.contains("72") {
            return Some(Self::Over24);
        }
        None
    }

    /// Classify a numeric elapsed-offline value, thresholds 24/48/72.
    pub fn from_hours(hours: f64) -> Self {
        if hours < 24.0 {
            Self::Under24
        } else if hours < 48.0 {
            Self::Over24
        } else if hours < 72.0 {
            Self::Over48
        } else {
            Self::Over72
        }
    }
}
