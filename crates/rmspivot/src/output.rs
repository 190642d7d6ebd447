//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Pivot tables have
//! data-driven columns, so table rendering goes through `tabled`'s
//! builder rather than the `Tabled` derive; fixed-shape listings (site
//! lists, alarm summaries) still use the derive.

use std::io::{self, IsTerminal, Write};

use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::Style,
};

use rmspivot_core::PivotTable;

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a pivot table in the chosen format.
///
/// - `table`: header row from key + value columns, display rows beneath
///   (repeated leading keys blanked, Total row last)
/// - `json` / `json-compact` / `yaml`: serializes the table via serde,
///   numeric rows intact (no display blanking)
/// - `plain`: tab-separated rows for scripting
pub fn render_pivot(format: &OutputFormat, table: &PivotTable) -> String {
    match format {
        OutputFormat::Table => pivot_to_tabled(table).to_string(),
        OutputFormat::Json => render_json(table, false),
        OutputFormat::JsonCompact => render_json(table, true),
        OutputFormat::Yaml => render_yaml(table),
        OutputFormat::Plain => pivot_to_plain(table),
    }
}

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Pivot-specific renderers ─────────────────────────────────────────

fn pivot_to_tabled(table: &PivotTable) -> Table {
    let mut builder = Builder::default();

    let mut header: Vec<String> = table.key_columns().to_vec();
    header.extend(table.value_columns().iter().cloned());
    builder.push_record(header);

    for row in table.display_rows() {
        let mut record = row.keys.clone();
        for column in table.value_columns() {
            record.push(row.cell(column).to_string());
        }
        builder.push_record(record);
    }

    let mut rendered = builder.build();
    rendered.with(Style::rounded());
    rendered
}

fn pivot_to_plain(table: &PivotTable) -> String {
    let mut lines = Vec::with_capacity(table.rows().len() + 2);

    let mut header: Vec<&str> = table.key_columns().iter().map(String::as_str).collect();
    header.extend(table.value_columns().iter().map(String::as_str));
    lines.push(header.join("\t"));

    for row in table.rows().iter().chain(std::iter::once(table.total_row())) {
        let mut fields: Vec<String> = row.keys.clone();
        for column in table.value_columns() {
            fields.push(row.cell(column).to_string());
        }
        lines.push(fields.join("\t"));
    }

    lines.join("\n")
}

// ── Format-specific renderers ────────────────────────────────────────

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).expect("serialization should not fail")
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    if compact {
        render_json_compact(data)
    } else {
        render_json_pretty(data)
    }
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}

#[cfg(test)]
mod tests {
    use rmspivot_core::PivotRow;

    use super::*;

    fn sample() -> PivotTable {
        let rows = vec![
            PivotRow {
                keys: vec!["Dhaka".into(), "Gulshan".into()],
                cells: [("GP".to_owned(), 2), ("Total".to_owned(), 2)]
                    .into_iter()
                    .collect(),
            },
            PivotRow {
                keys: vec!["Dhaka".into(), "Banani".into()],
                cells: [("GP".to_owned(), 1), ("Total".to_owned(), 1)]
                    .into_iter()
                    .collect(),
            },
        ];
        PivotTable::build(
            vec!["Cluster".into(), "Zone".into()],
            vec!["GP".into(), "Total".into()],
            rows,
        )
    }

    #[test]
    fn table_output_blanks_repeated_cluster_and_appends_total() {
        let rendered = render_pivot(&OutputFormat::Table, &sample());
        assert!(rendered.contains("Cluster"));
        assert!(rendered.contains("Gulshan"));
        assert!(rendered.contains("Total"));
        // "Dhaka" shows once; the second row's cluster cell is blanked.
        assert_eq!(rendered.matches("Dhaka").count(), 1);
    }

    #[test]
    fn plain_output_keeps_numeric_rows_unblanked() {
        let rendered = render_pivot(&OutputFormat::Plain, &sample());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Cluster\tZone\tGP\tTotal");
        assert_eq!(lines[1], "Dhaka\tGulshan\t2\t2");
        assert_eq!(lines[2], "Dhaka\tBanani\t1\t1");
        assert_eq!(lines[3], "Total\t\t3\t3");
    }

    #[test]
    fn json_output_round_trips() {
        let rendered = render_pivot(&OutputFormat::JsonCompact, &sample());
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(value["grand_total"], 3);
    }
}
