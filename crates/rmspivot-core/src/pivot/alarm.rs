// ── Alarm pivot builder ──

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::Serialize;

use super::table::{PivotRow, PivotTable, TOTAL_LABEL};
use crate::model::{AlarmRecord, DurationBucket, PRIMARY_DISCONNECT_ALARM};

/// The pivot for one alarm category, with its grand total alongside for
/// headers and summaries.
#[derive(Debug, Clone, Serialize)]
pub struct AlarmPivot {
    pub alarm_name: String,
    pub table: PivotTable,
    pub total: u64,
}

/// Distinct alarm names observed across a report, in first-seen order.
/// Feed this to [`crate::order::order_categories`] for display order.
pub fn observed_alarm_names(records: &[AlarmRecord]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut names = Vec::new();
    for record in records {
        if seen.insert(record.alarm_name.as_str()) {
            names.push(record.alarm_name.clone());
        }
    }
    names
}

/// Build the pivot for one alarm category.
///
/// Rows are keyed by (cluster, zone); columns are the distinct clients
/// observed in the filtered set (alphabetical), zero-filled, followed by a
/// row-wise `Total`. When `include_duration` is set and any filtered
/// record carries duration data, the four fixed `0+/2+/4+/8+` bucket
/// counts are joined on after the Total column.
///
/// Records with no extractable client are unclassifiable and excluded.
/// For the primary-disconnect category only, leased-site records (station
/// id starting with `L`) are additionally excluded.
///
/// A filter that matches nothing is not an error: the result is an empty
/// table with total 0.
pub fn build_alarm_pivot(
    records: &[AlarmRecord],
    alarm_name: &str,
    include_duration: bool,
) -> AlarmPivot {
    let exclude_leased = alarm_name == PRIMARY_DISCONNECT_ALARM;

    let filtered: Vec<&AlarmRecord> = records
        .iter()
        .filter(|r| r.alarm_name == alarm_name)
        .filter(|r| r.client().is_some())
        .filter(|r| !(exclude_leased && r.is_leased_site()))
        .collect();

    // Observed client columns, alphabetical.
    let clients: BTreeSet<&str> = filtered.iter().filter_map(|r| r.client()).collect();

    let has_duration = include_duration && filtered.iter().any(|r| r.duration_hours.is_some());

    // (cluster, zone) -> client -> count, plus bucket counts when joined.
    let mut groups: BTreeMap<(String, String), BTreeMap<&str, u64>> = BTreeMap::new();
    let mut duration_counts: BTreeMap<(String, String), [u64; 4]> = BTreeMap::new();

    for record in &filtered {
        let Some(client) = record.client() else { continue };
        let key = (record.cluster.clone(), record.zone.clone());
        *groups.entry(key.clone()).or_default().entry(client).or_insert(0) += 1;

        if has_duration {
            if let Some(bucket) = record.duration_bucket() {
                // Unknown has no column; those rows drop out of the
                // duration join but still count in the client columns.
                if let Some(idx) = DurationBucket::COLUMNS.iter().position(|b| *b == bucket) {
                    duration_counts.entry(key).or_default()[idx] += 1;
                }
            }
        }
    }

    let mut value_columns: Vec<String> = clients.iter().map(|c| (*c).to_owned()).collect();
    value_columns.push(TOTAL_LABEL.to_owned());
    if has_duration {
        value_columns.extend(DurationBucket::COLUMNS.iter().map(|b| b.as_str().to_owned()));
    }

    let rows: Vec<PivotRow> = groups
        .iter()
        .map(|((cluster, zone), counts)| {
            let mut cells = IndexMap::with_capacity(value_columns.len());
            let mut row_total = 0;
            for client in &clients {
                let count = counts.get(client).copied().unwrap_or(0);
                row_total += count;
                cells.insert((*client).to_owned(), count);
            }
            cells.insert(TOTAL_LABEL.to_owned(), row_total);

            if has_duration {
                let buckets = duration_counts
                    .get(&(cluster.clone(), zone.clone()))
                    .copied()
                    .unwrap_or_default();
                for (bucket, count) in DurationBucket::COLUMNS.iter().zip(buckets) {
                    cells.insert(bucket.as_str().to_owned(), count);
                }
            }

            PivotRow {
                keys: vec![cluster.clone(), zone.clone()],
                cells,
            }
        })
        .collect();

    let table = PivotTable::build(
        vec!["Cluster".to_owned(), "Zone".to_owned()],
        value_columns,
        rows,
    );
    let total = table.grand_total();

    AlarmPivot {
        alarm_name: alarm_name.to_owned(),
        table,
        total,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(cluster: &str, zone: &str, alias: &str, alarm: &str) -> AlarmRecord {
        AlarmRecord {
            station: "R-0001".into(),
            cluster: cluster.into(),
            zone: zone.into(),
            site_alias: alias.into(),
            alarm_name: alarm.into(),
            alarm_time: None,
            duration_hours: None,
        }
    }

    #[test]
    fn round_trip_scenario() {
        let records = vec![
            record("A", "1", "S1 (GP)", "Door Open"),
            record("A", "1", "S2 (GP)", "Door Open"),
            record("A", "2", "S3 (Robi)", "Door Open"),
        ];

        let pivot = build_alarm_pivot(&records, "Door Open", false);
        let rows = pivot.table.rows();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].keys, vec!["A".to_owned(), "1".to_owned()]);
        assert_eq!(rows[0].cell("GP"), 2);
        assert_eq!(rows[0].cell("Robi"), 0);
        assert_eq!(rows[0].cell("Total"), 2);

        assert_eq!(rows[1].keys, vec!["A".to_owned(), "2".to_owned()]);
        assert_eq!(rows[1].cell("Robi"), 1);
        assert_eq!(rows[1].cell("Total"), 1);

        let total = pivot.table.total_row();
        assert_eq!(total.cell("GP"), 2);
        assert_eq!(total.cell("Robi"), 1);
        assert_eq!(total.cell("Total"), 3);
        assert_eq!(pivot.total, 3);
    }

    #[test]
    fn zero_fill_every_observed_client() {
        let records = vec![
            record("A", "1", "S1 (GP)", "Mains Fail"),
            record("B", "9", "S2 (Robi)", "Mains Fail"),
        ];
        let pivot = build_alarm_pivot(&records, "Mains Fail", false);
        for row in pivot.table.rows() {
            for client in ["GP", "Robi"] {
                assert!(
                    row.cells.contains_key(client),
                    "column {client} missing from {:?}",
                    row.keys
                );
            }
        }
    }

    #[test]
    fn other_alarm_types_are_filtered_out() {
        let records = vec![
            record("A", "1", "S1 (GP)", "Door Open"),
            record("A", "1", "S2 (GP)", "Mains Fail"),
        ];
        let pivot = build_alarm_pivot(&records, "Door Open", false);
        assert_eq!(pivot.total, 1);
    }

    #[test]
    fn records_without_client_are_excluded() {
        let records = vec![
            record("A", "1", "S1 (GP)", "Door Open"),
            record("A", "1", "No tag here", "Door Open"),
        ];
        let pivot = build_alarm_pivot(&records, "Door Open", false);
        assert_eq!(pivot.total, 1);
    }

    #[test]
    fn leased_sites_excluded_only_for_primary_disconnect() {
        let mut leased = record("A", "1", "S1 (GP)", PRIMARY_DISCONNECT_ALARM);
        leased.station = "L-0012".into();
        let mut owned = record("A", "1", "S2 (GP)", PRIMARY_DISCONNECT_ALARM);
        owned.station = "R-0012".into();

        let records = vec![leased.clone(), owned];
        let pivot = build_alarm_pivot(&records, PRIMARY_DISCONNECT_ALARM, false);
        assert_eq!(pivot.total, 1);

        // Same station prefix under a different alarm type is included.
        leased.alarm_name = "Door Open".into();
        let pivot = build_alarm_pivot(&[leased], "Door Open", false);
        assert_eq!(pivot.total, 1);
    }

    #[test]
    fn no_matching_rows_yields_empty_table() {
        let records = vec![record("A", "1", "S1 (GP)", "Door Open")];
        let pivot = build_alarm_pivot(&records, "Battery Low", false);
        assert!(pivot.table.is_empty());
        assert_eq!(pivot.total, 0);
    }

    #[test]
    fn duration_columns_join_after_total() {
        let mut r1 = record("A", "1", "S1 (GP)", "Mains Fail");
        r1.duration_hours = Some(2.0);
        let mut r2 = record("A", "1", "S2 (GP)", "Mains Fail");
        r2.duration_hours = Some(9.5);
        let mut r3 = record("A", "2", "S3 (Robi)", "Mains Fail");
        r3.duration_hours = None; // dropped from the join, kept in counts

        let pivot = build_alarm_pivot(&[r1, r2, r3], "Mains Fail", true);
        assert_eq!(
            pivot.table.value_columns(),
            &["GP", "Robi", "Total", "0+", "2+", "4+", "8+"]
        );

        let rows = pivot.table.rows();
        assert_eq!(rows[0].cell("2+"), 1);
        assert_eq!(rows[0].cell("8+"), 1);
        assert_eq!(rows[0].cell("0+"), 0);
        // Zone 2's record had no duration: bucket columns zero-filled.
        assert_eq!(rows[1].cell("Total"), 1);
        assert_eq!(rows[1].cell("0+"), 0);
        assert_eq!(pivot.table.total_row().cell("2+"), 1);
    }

    #[test]
    fn duration_columns_absent_when_no_record_has_duration() {
        let records = vec![record("A", "1", "S1 (GP)", "Mains Fail")];
        let pivot = build_alarm_pivot(&records, "Mains Fail", true);
        assert_eq!(pivot.table.value_columns(), &["GP", "Total"]);
    }
}
