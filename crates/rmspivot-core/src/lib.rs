//! Pivot/aggregation engine for telecom RMS alarm and offline-site reports.
//!
//! This crate owns the domain model and all transformation rules between a
//! raw report export and the grouped summary tables the CLI renders:
//!
//! - **[`model`]** — `AlarmRecord` / `OfflineRecord` rows and the
//!   categorical duration buckets derived from them.
//!
//! - **[`extract`]** — pure field extractors: client/tenant parsed out of a
//!   composite site label, active-alarm hours classified into `0+/2+/4+/8+`
//!   buckets, elapsed-offline time rendered as a human unit. The two
//!   bucketing schemes are deliberately separate and never interchangeable.
//!
//! - **[`pivot`]** — the builders producing [`PivotTable`] values: counts
//!   keyed by (cluster, zone) with dynamic client or duration-bucket
//!   columns, zero-filled, with a `Total` column, a trailing synthetic
//!   `Total` row, and an independently computed grand total.
//!
//! - **[`order`]** — the priority-list ordering policy for alarm categories
//!   (configured order first, alphabetical fallback for the rest).
//!
//! - **[`report`]** — CSV ingestion of the source exports (header on the
//!   third physical row, required-column validation, per-row recovery with
//!   warning counts) plus filename-embedded timestamp parsing.
//!
//! Everything here is synchronous and side-effect free with respect to
//! shared state: reference time and priority lists are explicit arguments,
//! so one invocation never observes another.

pub mod error;
pub mod extract;
pub mod model;
pub mod order;
pub mod pivot;
pub mod report;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::ReportError;
pub use extract::{classify_duration_hours, classify_elapsed_offline, extract_client};
pub use model::{
    AlarmRecord, DurationBucket, LEASED_SITE_PREFIX, OfflineBucket, OfflineRecord,
    PRIMARY_DISCONNECT_ALARM,
};
pub use order::order_categories;
pub use pivot::{AlarmPivot, OfflinePivot, PivotRow, PivotTable, build_alarm_pivot, build_offline_pivot};
pub use report::{AlarmReport, OfflineReport, ParseWarnings};
