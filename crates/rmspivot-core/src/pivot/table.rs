// ── The pivot table artifact ──
//
// Column sets are data-driven, so a row is an ordered key tuple plus an
// ordered map from category label to count — not a fixed-width struct.

use indexmap::IndexMap;
use serde::Serialize;

/// Label used for the Total column and the synthetic trailing row's key.
pub const TOTAL_LABEL: &str = "Total";

/// One pivot row: grouping keys plus a cell per value column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotRow {
    /// Key cells, one per key column (e.g. cluster, zone).
    pub keys: Vec<String>,
    /// Count cells keyed by value-column label, in column order.
    pub cells: IndexMap<String, u64>,
}

impl PivotRow {
    /// Cell value for a column, zero when absent.
    pub fn cell(&self, column: &str) -> u64 {
        self.cells.get(column).copied().unwrap_or(0)
    }
}

/// A grouped, cross-tabulated count table: ordered data rows, a `Total`
/// column, a synthetic trailing `Total` row, and a scalar grand total.
///
/// Never mutated after construction. The only presentation concession —
/// blanking repeated leading key values to simulate merged cells — happens
/// on a display copy in [`PivotTable::display_rows`], strictly after all
/// summation, so the numeric rows stay intact for verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotTable {
    key_columns: Vec<String>,
    value_columns: Vec<String>,
    rows: Vec<PivotRow>,
    total_row: PivotRow,
    grand_total: u64,
}

impl PivotTable {
    /// Build a table from data rows, computing the synthetic `Total` row
    /// (column-wise sums, key cells `"Total"` then blanks) and defaulting
    /// the grand total to the Total row's `Total` cell.
    ///
    /// Every data row is expected to carry a cell for every value column —
    /// builders zero-fill before constructing rows.
    pub fn build(
        key_columns: Vec<String>,
        value_columns: Vec<String>,
        rows: Vec<PivotRow>,
    ) -> Self {
        let mut total_cells = IndexMap::with_capacity(value_columns.len());
        for column in &value_columns {
            let sum = rows.iter().map(|r| r.cell(column)).sum();
            total_cells.insert(column.clone(), sum);
        }

        let mut total_keys = vec![TOTAL_LABEL.to_owned()];
        total_keys.resize(key_columns.len().max(1), String::new());

        let total_row = PivotRow {
            keys: total_keys,
            cells: total_cells,
        };
        let grand_total = total_row.cell(TOTAL_LABEL);

        Self {
            key_columns,
            value_columns,
            rows,
            total_row,
            grand_total,
        }
    }

    /// Override the grand total with an independently computed value
    /// (e.g. distinct-site counts for offline pivots). The Total row is a
    /// derived display artifact and stays untouched.
    pub fn set_grand_total(&mut self, grand_total: u64) {
        self.grand_total = grand_total;
    }

    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    pub fn value_columns(&self) -> &[String] {
        &self.value_columns
    }

    /// Data rows, excluding the synthetic Total row.
    pub fn rows(&self) -> &[PivotRow] {
        &self.rows
    }

    pub fn total_row(&self) -> &PivotRow {
        &self.total_row
    }

    pub fn grand_total(&self) -> u64 {
        self.grand_total
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Presentation copy of all rows (data + Total), with a row's leading
    /// key blanked when it repeats the previous row's original value —
    /// the merged-cell look without merged cells. Runs on clones; the
    /// aggregation rows are never blanked.
    pub fn display_rows(&self) -> Vec<PivotRow> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        let mut previous: Option<&str> = None;

        for row in &self.rows {
            let mut shown = row.clone();
            if let (Some(first), Some(prev)) = (shown.keys.first_mut(), previous) {
                if first == prev {
                    first.clear();
                }
            }
            // Compare against the original value, not the blanked one.
            previous = row.keys.first().map(String::as_str);
            out.push(shown);
        }

        out.push(self.total_row.clone());
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(keys: &[&str], cells: &[(&str, u64)]) -> PivotRow {
        PivotRow {
            keys: keys.iter().map(|k| (*k).to_owned()).collect(),
            cells: cells.iter().map(|(c, v)| ((*c).to_owned(), *v)).collect(),
        }
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_owned()).collect()
    }

    #[test]
    fn total_row_sums_every_column() {
        let table = PivotTable::build(
            columns(&["Cluster", "Zone"]),
            columns(&["GP", "Robi", "Total"]),
            vec![
                row(&["A", "1"], &[("GP", 2), ("Robi", 0), ("Total", 2)]),
                row(&["A", "2"], &[("GP", 0), ("Robi", 1), ("Total", 1)]),
            ],
        );

        let total = table.total_row();
        assert_eq!(total.keys, vec!["Total".to_owned(), String::new()]);
        assert_eq!(total.cell("GP"), 2);
        assert_eq!(total.cell("Robi"), 1);
        assert_eq!(total.cell("Total"), 3);
        assert_eq!(table.grand_total(), 3);
    }

    #[test]
    fn total_row_matches_column_sums_over_data_rows() {
        let table = PivotTable::build(
            columns(&["Cluster", "Zone"]),
            columns(&["X", "Total"]),
            vec![
                row(&["A", "1"], &[("X", 4), ("Total", 4)]),
                row(&["B", "1"], &[("X", 7), ("Total", 7)]),
                row(&["C", "2"], &[("X", 1), ("Total", 1)]),
            ],
        );
        for column in table.value_columns() {
            let sum: u64 = table.rows().iter().map(|r| r.cell(column)).sum();
            assert_eq!(table.total_row().cell(column), sum);
        }
    }

    #[test]
    fn empty_table_has_zero_totals() {
        let table = PivotTable::build(
            columns(&["Cluster", "Zone"]),
            columns(&["Total"]),
            Vec::new(),
        );
        assert!(table.is_empty());
        assert_eq!(table.grand_total(), 0);
        assert_eq!(table.total_row().cell("Total"), 0);
    }

    #[test]
    fn display_rows_blank_repeated_leading_keys() {
        let table = PivotTable::build(
            columns(&["Cluster", "Zone"]),
            columns(&["Total"]),
            vec![
                row(&["A", "1"], &[("Total", 1)]),
                row(&["A", "2"], &[("Total", 1)]),
                row(&["B", "1"], &[("Total", 1)]),
                row(&["B", "2"], &[("Total", 1)]),
            ],
        );

        let shown = table.display_rows();
        let clusters: Vec<&str> = shown.iter().map(|r| r.keys[0].as_str()).collect();
        assert_eq!(clusters, vec!["A", "", "B", "", "Total"]);

        // Aggregation rows stay intact.
        assert_eq!(table.rows()[1].keys[0], "A");
        assert_eq!(table.rows()[3].keys[0], "B");
    }

    #[test]
    fn display_rows_blanking_does_not_cascade_across_groups() {
        // A, A, B, A: the fourth row's "A" follows "B" and must remain.
        let table = PivotTable::build(
            columns(&["Cluster"]),
            columns(&["Total"]),
            vec![
                row(&["A"], &[("Total", 1)]),
                row(&["A"], &[("Total", 1)]),
                row(&["B"], &[("Total", 1)]),
                row(&["A"], &[("Total", 1)]),
            ],
        );
        let rows = table.display_rows();
        let clusters: Vec<&str> = rows
            .iter()
            .map(|r| r.keys[0].as_str())
            .collect();
        assert_eq!(clusters, vec!["A", "", "B", "A", "Total"]);
    }
}
