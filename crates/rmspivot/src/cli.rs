//! Clap derive structures for the `rmspivot` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rmspivot -- pivot-table reports for telecom RMS exports
#[derive(Debug, Parser)]
#[command(
    name = "rmspivot",
    version,
    about = "Cross-tabulate RMS alarm and offline-site reports",
    long_about = "Ingests spreadsheet exports from an RMS network-monitoring platform\n\
        and produces cluster/zone pivot tables: alarm counts per client/tenant,\n\
        active-duration buckets, and offline-duration summaries, for terminal\n\
        viewing or workbook export.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "RMSPIVOT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Reference clock for elapsed-offline buckets (RFC 3339; defaults to now)
    #[arg(long, env = "RMSPIVOT_REFERENCE_TIME", global = true)]
    pub reference_time: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pivot alarm reports by cluster/zone and client
    #[command(alias = "al")]
    Alarms(AlarmsArgs),

    /// Summarize offline-site reports
    #[command(alias = "off")]
    Offline(OfflineArgs),

    /// Export pivot tables as a workbook (one sheet per alarm type)
    Export(ExportArgs),

    /// Manage CLI configuration (priority alarm list, defaults)
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ALARMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AlarmsArgs {
    #[command(subcommand)]
    pub command: AlarmsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlarmsCommand {
    /// Build a pivot table per alarm type, in priority order
    Pivot {
        /// Alarm report export (CSV; headers on the third row)
        file: PathBuf,

        /// Restrict to a single alarm type
        #[arg(long, short = 'a')]
        alarm: Option<String>,

        /// Skip the active-duration bucket columns
        #[arg(long)]
        no_duration: bool,
    },

    /// One row per alarm type with its total count
    Summary {
        /// Alarm report export (CSV; headers on the third row)
        file: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OFFLINE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OfflineArgs {
    #[command(subcommand)]
    pub command: OfflineCommand,
}

#[derive(Debug, Subcommand)]
pub enum OfflineCommand {
    /// Pivot offline sites by cluster/zone and duration bucket
    Pivot {
        /// Offline report export (CSV; headers on the third row)
        file: PathBuf,
    },

    /// List distinct offline sites with elapsed time since last seen
    Sites {
        /// Offline report export (CSV; headers on the third row)
        file: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EXPORT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Alarm report export (CSV; headers on the third row)
    pub file: PathBuf,

    /// Offline report to include as an extra sheet
    #[arg(long)]
    pub offline: Option<PathBuf>,

    /// Output workbook directory (one CSV sheet per alarm type)
    #[arg(long, short = 'O', required = true)]
    pub out: PathBuf,

    /// Skip the active-duration bucket columns
    #[arg(long)]
    pub no_duration: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with the default priority alarm list
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a configuration value
    Set {
        /// Config key: "priority_alarms" (comma-separated), "defaults.output", "defaults.color"
        key: String,

        /// Value to set
        value: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
