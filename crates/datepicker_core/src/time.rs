//! Host clock used by the "jump to today" request.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDate};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as i64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

/// Calendar date for a unix millisecond timestamp, in UTC.
pub fn date_from_unix_ms(timestamp_ms: i64) -> NaiveDate {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|instant| instant.date_naive())
        .unwrap_or_default()
}

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    date_from_unix_ms(unix_time_ms_now())
}
