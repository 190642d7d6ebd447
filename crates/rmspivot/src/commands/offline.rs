//! Offline-site report command handlers.

use std::collections::HashSet;

use serde::Serialize;
use tabled::Tabled;

use rmspivot_core::{OfflineRecord, build_offline_pivot, classify_elapsed_offline};

use crate::cli::{GlobalOpts, OfflineArgs, OfflineCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Site listing row ────────────────────────────────────────────────

#[derive(Serialize)]
struct SiteListing {
    cluster: String,
    zone: String,
    site_alias: String,
    last_online: Option<String>,
    elapsed: String,
}

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Cluster")]
    cluster: String,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Last Online")]
    last_online: String,
    #[tabled(rename = "Offline For")]
    elapsed: String,
}

impl From<&SiteListing> for SiteRow {
    fn from(s: &SiteListing) -> Self {
        Self {
            cluster: s.cluster.clone(),
            zone: s.zone.clone(),
            site: s.site_alias.clone(),
            last_online: s.last_online.clone().unwrap_or_else(|| "-".into()),
            elapsed: s.elapsed.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: OfflineArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let reference = util::reference_time(global)?;

    match args.command {
        OfflineCommand::Pivot { file } => {
            let report = util::load_offline_report(&file, reference)?;
            util::report_warnings(report.warnings, global.quiet);

            let pivot = build_offline_pivot(&report.records);

            match global.output {
                OutputFormat::Json => {
                    output::print_output(&output::render_json_pretty(&pivot), global.quiet);
                }
                OutputFormat::JsonCompact => {
                    output::print_output(&output::render_json_compact(&pivot), global.quiet);
                }
                OutputFormat::Yaml => {
                    output::print_output(&output::render_yaml(&pivot), global.quiet);
                }
                _ => {
                    output::print_output(
                        &output::render_pivot(&global.output, &pivot.table),
                        global.quiet,
                    );
                    // Group totals count distinct sites per group, so
                    // their sum can exceed this overall distinct count.
                    if !global.quiet {
                        eprintln!("Distinct offline sites: {}", pivot.distinct_sites);
                    }
                }
            }
            Ok(())
        }

        OfflineCommand::Sites { file } => {
            let report = util::load_offline_report(&file, reference)?;
            util::report_warnings(report.warnings, global.quiet);

            let listings = site_listings(&report.records, reference);
            let out = output::render_list(
                &global.output,
                &listings,
                |s| SiteRow::from(s),
                |s| s.site_alias.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// One listing per distinct site alias, first record wins, ordered by
/// (cluster, zone, site).
fn site_listings(
    records: &[OfflineRecord],
    reference: chrono::NaiveDateTime,
) -> Vec<SiteListing> {
    let mut seen = HashSet::new();
    let mut listings: Vec<SiteListing> = records
        .iter()
        .filter(|r| seen.insert(r.site_alias.clone()))
        .map(|r| {
            let elapsed = match r.last_online {
                Some(ts) => classify_elapsed_offline(reference, ts).1,
                None => "unknown".into(),
            };
            SiteListing {
                cluster: r.cluster.clone(),
                zone: r.zone.clone(),
                site_alias: r.site_alias.clone(),
                last_online: r
                    .last_online
                    .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string()),
                elapsed,
            }
        })
        .collect();

    listings.sort_by(|a, b| {
        (&a.cluster, &a.zone, &a.site_alias).cmp(&(&b.cluster, &b.zone, &b.site_alias))
    });
    listings
}
