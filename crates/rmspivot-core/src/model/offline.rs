// ── Offline report rows ──

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::bucket::OfflineBucket;

/// One site currently reported offline.
///
/// Derives `Eq + Hash` over every field so exact duplicate rows — a
/// repeated-upload artifact in the source exports — can be removed before
/// aggregation. The duration bucket is resolved once at ingestion (from
/// the export's free-text label or from elapsed time); the pivot only
/// ever sees the enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfflineRecord {
    pub cluster: String,
    pub zone: String,
    pub site_alias: String,
    /// Last time the site was seen online. `None` when unparseable.
    pub last_online: Option<NaiveDateTime>,
    /// Offline-duration bucket. `None` when neither the duration text nor
    /// a usable timestamp was available; such rows still count toward the
    /// distinct-site total but not toward any bucket column.
    pub bucket: Option<OfflineBucket>,
}
