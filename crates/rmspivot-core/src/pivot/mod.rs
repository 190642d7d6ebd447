//! Pivot builders and the table artifact they produce.

mod alarm;
mod offline;
mod table;

pub use alarm::{AlarmPivot, build_alarm_pivot, observed_alarm_names};
pub use offline::{OfflinePivot, build_offline_pivot};
pub use table::{PivotRow, PivotTable, TOTAL_LABEL};
