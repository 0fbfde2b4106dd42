//! Common time/rounding helpers for gasmon_core.

use chrono::{DateTime, Utc};

/// Number of milliseconds in one day.
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Round to one decimal place, halves away from zero.
#[inline]
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Convert epoch milliseconds into a UTC timestamp.
/// Out-of-range values map to the Unix epoch.
#[inline]
pub fn datetime_from_ms(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

/// Whole days (one decimal) between two instants, clamped at zero so a clock
/// stepping backwards never yields a negative duration.
#[inline]
pub fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let ms = (to - from).num_milliseconds().max(0);
    round1(ms as f64 / MILLIS_PER_DAY)
}
