//! Domain model: report rows and the categorical buckets derived from them.

mod alarm;
mod bucket;
mod offline;

pub use alarm::{AlarmRecord, LEASED_SITE_PREFIX, PRIMARY_DISCONNECT_ALARM};
pub use bucket::{DurationBucket, OfflineBucket};
pub use offline::OfflineRecord;
