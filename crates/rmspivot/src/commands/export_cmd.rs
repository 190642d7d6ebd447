//! Workbook export command handler.

use rmspivot_core::{PivotTable, build_alarm_pivot, build_offline_pivot, order_categories, pivot::observed_alarm_names};

use crate::cli::{ExportArgs, GlobalOpts};
use crate::error::CliError;
use crate::export;

use super::util;

pub fn handle(args: ExportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let report = util::load_alarm_report(&args.file)?;
    util::report_warnings(report.warnings, global.quiet);

    let cfg = rmspivot_config::load_config_or_default();
    let names = order_categories(
        &observed_alarm_names(&report.records),
        &cfg.priority_alarms,
    );

    // Sheet order follows the priority list, one sheet per alarm type.
    let mut tables: Vec<(String, PivotTable)> = names
        .iter()
        .map(|name| {
            let pivot = build_alarm_pivot(&report.records, name, !args.no_duration);
            (name.clone(), pivot.table)
        })
        .collect();

    if let Some(offline_path) = &args.offline {
        let reference = util::reference_time(global)?;
        let offline = util::load_offline_report(offline_path, reference)?;
        util::report_warnings(offline.warnings, global.quiet);
        let pivot = build_offline_pivot(&offline.records);
        tables.push(("Offline Summary".to_owned(), pivot.table));
    }

    if args.out.exists()
        && args.out.read_dir().map(|mut d| d.next().is_some()).unwrap_or(false)
        && !util::confirm(
            &format!("'{}' is not empty. Write sheets into it?", args.out.display()),
            global.yes,
        )?
    {
        return Ok(());
    }

    let sheets: Vec<(String, &PivotTable)> = tables
        .iter()
        .map(|(name, table)| (name.clone(), table))
        .collect();
    let written = export::write_workbook(&args.out, &sheets)?;

    if !global.quiet {
        eprintln!(
            "Wrote {} sheet(s) to {}",
            written.len(),
            args.out.display()
        );
    }
    Ok(())
}
