// ── Alarm report rows ──

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::bucket::DurationBucket;
use crate::extract::{classify_duration_hours, extract_client};

/// The alarm category that denotes a primary power disconnect. Only this
/// category gets the leased-site exclusion in the pivot.
pub const PRIMARY_DISCONNECT_ALARM: &str = "DCDB-01 Primary Disconnect";

/// Station identifiers starting with this letter mark leased sites.
pub const LEASED_SITE_PREFIX: char = 'L';

/// One reported alarm event, as ingested from an RMS export row.
///
/// Immutable after construction; derived fields (client, duration bucket)
/// are computed on demand from the stored text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmRecord {
    /// RMS station identifier, e.g. "R-0012".
    pub station: String,
    /// Top-level region.
    pub cluster: String,
    /// Sub-region within the cluster.
    pub zone: String,
    /// Composite site label; encodes the client tag in parentheses,
    /// e.g. "Tower-9 (GP)".
    pub site_alias: String,
    /// Alarm category, e.g. "Mains Fail".
    pub alarm_name: String,
    /// When the alarm was raised. `None` when the source cell was absent
    /// or unparseable.
    pub alarm_time: Option<NaiveDateTime>,
    /// How long the alarm has been active, in hours. `None` when the
    /// column was absent or the cell did not parse as a number.
    pub duration_hours: Option<f64>,
}

impl AlarmRecord {
    /// Client/tenant tag parsed from the site alias. Records without one
    /// are unclassifiable and excluded from every pivot.
    pub fn client(&self) -> Option<&str> {
        extract_client(&self.site_alias)
    }

    /// Active-duration bucket, when duration data is present.
    pub fn duration_bucket(&self) -> Option<DurationBucket> {
        self.duration_hours.map(classify_duration_hours)
    }

    /// Whether the station identifier marks a leased site.
    pub fn is_leased_site(&self) -> bool {
        self.station.starts_with(LEASED_SITE_PREFIX)
    }
}
