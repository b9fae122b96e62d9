//! Record transformation
//!
//! Pure functions from raw provider JSON to flat output records.
//!
//! - `adjust_timezone` / `millis_to_seconds` - field-level conversions
//! - `DateRange` - calendar range rendered as API query bounds
//! - `SleepRecord`, `Subscription`, `ChartPoint` - flattened schemas

mod records;
mod time;

pub use records::{flatten_sleep, ChartPoint, RecordId, SleepRecord, Subscription};
pub use time::{adjust_timezone, millis_to_seconds, parse_offset, DateRange};
