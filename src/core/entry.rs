//! Consumer-side mirror of the JSON wire format.
//!
//! Output is never produced by marshalling this struct (lines are built as
//! text directly); it exists so consumers and tests can parse emitted JSON
//! back and recover the original timestamp.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// Logical shape of one JSON-mode log line.
///
/// All fields are defaulted so entries produced with timestamps, thread id
/// or caller capture disabled still deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JsonEntry {
    /// Seconds since epoch at microsecond resolution, see [`time_to_ts`].
    pub ts: f64,
    /// Thread (concurrency-unit) id, if enabled.
    pub r: i64,
    pub level: String,
    pub file: String,
    pub line: u32,
    pub msg: String,
}

impl JsonEntry {
    /// Converts the wire timestamp back to a UTC instant.
    ///
    /// Inverse of [`time_to_ts`]: recovers the original instant truncated
    /// to microsecond resolution.
    pub fn time(&self) -> DateTime<Utc> {
        let mut sec = self.ts as i64;
        let mut micros = (1e6 * (self.ts - sec as f64)).round() as i64;
        // Float noise can push the fractional part just past a boundary.
        if micros >= 1_000_000 {
            sec += 1;
            micros -= 1_000_000;
        } else if micros < 0 {
            sec -= 1;
            micros += 1_000_000;
        }
        DateTime::from_timestamp(sec, (micros * 1000) as u32).unwrap_or_default()
    }
}

/// Converts an instant to the wire timestamp: seconds since epoch at
/// microsecond resolution.
///
/// Sub-microsecond precision is truncated, not rounded; the wire value is
/// never past the original instant. Consumers rely on [`JsonEntry::time`]
/// being an exact inverse at that resolution.
pub fn time_to_ts<Tz: TimeZone>(t: DateTime<Tz>) -> f64 {
    t.timestamp_micros() as f64 / 1e6
}
