// ── Offline pivot builder ──

use std::collections::{BTreeMap, BTreeSet, HashSet};

use indexmap::IndexMap;
use serde::Serialize;

use super::table::{PivotRow, PivotTable, TOTAL_LABEL};
use crate::model::{OfflineBucket, OfflineRecord};

/// The offline summary table plus the authoritative distinct-site count.
#[derive(Debug, Clone, Serialize)]
pub struct OfflinePivot {
    pub table: PivotTable,
    /// Distinct site aliases over the whole deduplicated set. Computed
    /// independently of the Total row; the authoritative grand total.
    pub distinct_sites: u64,
}

/// Build the offline-duration pivot.
///
/// Exact duplicate rows — repeated-upload artifacts — are removed before
/// any counting, so a doubled input produces identical output. Rows are
/// keyed by (cluster, zone); columns are the four offline buckets plus a
/// `Total` of **distinct** site aliases in the group (not raw row count).
/// Records with no resolvable bucket still count toward site totals.
pub fn build_offline_pivot(records: &[OfflineRecord]) -> OfflinePivot {
    let mut seen = HashSet::new();
    let deduped: Vec<&OfflineRecord> = records.iter().filter(|r| seen.insert(*r)).collect();

    let mut groups: BTreeMap<(String, String), ([u64; 4], BTreeSet<&str>)> = BTreeMap::new();
    let mut all_sites: BTreeSet<&str> = BTreeSet::new();

    for record in &deduped {
        let key = (record.cluster.clone(), record.zone.clone());
        let (buckets, sites) = groups.entry(key).or_default();
        if let Some(bucket) = record.bucket {
            if let Some(idx) = OfflineBucket::COLUMNS.iter().position(|b| *b == bucket) {
                buckets[idx] += 1;
            }
        }
        sites.insert(record.site_alias.as_str());
        all_sites.insert(record.site_alias.as_str());
    }

    let mut value_columns: Vec<String> = OfflineBucket::COLUMNS
        .iter()
        .map(|b| b.as_str().to_owned())
        .collect();
    value_columns.push(TOTAL_LABEL.to_owned());

    let rows: Vec<PivotRow> = groups
        .into_iter()
        .map(|((cluster, zone), (buckets, sites))| {
            let mut cells = IndexMap::with_capacity(value_columns.len());
            for (bucket, count) in OfflineBucket::COLUMNS.iter().zip(buckets) {
                cells.insert(bucket.as_str().to_owned(), count);
            }
            cells.insert(TOTAL_LABEL.to_owned(), sites.len() as u64);
            PivotRow {
                keys: vec![cluster, zone],
                cells,
            }
        })
        .collect();

    let mut table = PivotTable::build(
        vec!["Cluster".to_owned(), "Zone".to_owned()],
        value_columns,
        rows,
    );

    // Recomputed from raw distinct site labels rather than read off the
    // Total row: a site appearing in two groups must count once.
    let distinct_sites = all_sites.len() as u64;
    table.set_grand_total(distinct_sites);

    OfflinePivot {
        table,
        distinct_sites,
    }
}
