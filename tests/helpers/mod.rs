#![allow(dead_code)]

pub mod mock_channel;
pub mod test_metrics;

use chrono::{NaiveDate, NaiveDateTime};

/// The instant used wherever a test needs a deterministic timestamp.
pub fn fixed_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 26)
        .unwrap()
        .and_hms_opt(10, 45, 0)
        .unwrap()
}
