//! Alarm report command handlers.

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::Tabled;

use rmspivot_core::{
    build_alarm_pivot, order_categories, pivot::observed_alarm_names,
    report::filename::report_timestamp_label,
};

use crate::cli::{AlarmsArgs, AlarmsCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Summary row ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct AlarmSummary {
    alarm_name: String,
    count: u64,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Alarm")]
    alarm: String,
    #[tabled(rename = "Count")]
    count: u64,
}

impl From<&AlarmSummary> for SummaryRow {
    fn from(s: &AlarmSummary) -> Self {
        Self {
            alarm: s.alarm_name.clone(),
            count: s.count,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: AlarmsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AlarmsCommand::Pivot {
            file,
            alarm,
            no_duration,
        } => {
            let report = util::load_alarm_report(&file)?;
            util::report_warnings(report.warnings, global.quiet);

            let names = match alarm {
                Some(name) => vec![name],
                None => {
                    let cfg = rmspivot_config::load_config_or_default();
                    order_categories(
                        &observed_alarm_names(&report.records),
                        &cfg.priority_alarms,
                    )
                }
            };

            let pivots: Vec<_> = names
                .iter()
                .map(|name| build_alarm_pivot(&report.records, name, !no_duration))
                .collect();

            match global.output {
                // One document covering every category.
                OutputFormat::Json => {
                    output::print_output(&output::render_json_pretty(&pivots), global.quiet);
                }
                OutputFormat::JsonCompact => {
                    output::print_output(&output::render_json_compact(&pivots), global.quiet);
                }
                OutputFormat::Yaml => {
                    output::print_output(&output::render_yaml(&pivots), global.quiet);
                }
                // One heading + table per category.
                _ => {
                    let file_name = file
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    if !global.quiet {
                        eprintln!("Report time: {}", report_timestamp_label(&file_name));
                    }
                    for pivot in &pivots {
                        let heading = format!("{} ({})", pivot.alarm_name, pivot.total);
                        let heading = if output::should_color(&global.color) {
                            heading.bold().to_string()
                        } else {
                            heading
                        };
                        output::print_output(&heading, global.quiet);
                        output::print_output(
                            &output::render_pivot(&global.output, &pivot.table),
                            global.quiet,
                        );
                    }
                }
            }
            Ok(())
        }

        AlarmsCommand::Summary { file } => {
            let report = util::load_alarm_report(&file)?;
            util::report_warnings(report.warnings, global.quiet);

            let cfg = rmspivot_config::load_config_or_default();
            let names = order_categories(
                &observed_alarm_names(&report.records),
                &cfg.priority_alarms,
            );

            let summaries: Vec<AlarmSummary> = names
                .iter()
                .map(|name| AlarmSummary {
                    alarm_name: name.clone(),
                    count: build_alarm_pivot(&report.records, name, false).total,
                })
                .collect();

            let out = output::render_list(
                &global.output,
                &summaries,
                |s| SummaryRow::from(s),
                |s| format!("{}\t{}", s.alarm_name, s.count),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
