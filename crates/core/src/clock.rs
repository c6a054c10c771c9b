// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall-clock supply and timestamp formatting.
//!
//! Every timestamp in the system is fixed-width UTC text of the form
//! `YYYY-MM-DDTHH:MM:SSZ`. The width is an invariant: with all components
//! zero-padded, lexicographic order equals chronological order, so expiry
//! filtering can compare strings directly in queries and in the pure core.
//!
//! Each externally visible operation captures "now" exactly once and threads
//! the same value through every decision it makes, so one operation never
//! observes two different clocks.

use crate::CoreError;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

/// The fixed-width UTC timestamp format used everywhere in the system.
const TIMESTAMP_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// Returns the current UTC time.
#[must_use]
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Formats a time as fixed-width UTC text.
///
/// # Arguments
///
/// * `ts` - The time to format
#[must_use]
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    let ts: OffsetDateTime = ts.to_offset(time::UtcOffset::UTC);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        ts.year(),
        u8::from(ts.month()),
        ts.day(),
        ts.hour(),
        ts.minute(),
        ts.second()
    )
}

/// Returns the current UTC time as fixed-width text.
#[must_use]
pub fn now_timestamp() -> String {
    format_timestamp(now_utc())
}

/// Parses fixed-width UTC text back into a time.
///
/// # Arguments
///
/// * `value` - The timestamp text to parse
///
/// # Errors
///
/// Returns an error if the text does not match the fixed-width format.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, CoreError> {
    PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| CoreError::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Computes a hold expiry timestamp.
///
/// # Arguments
///
/// * `now` - The time the hold is created
/// * `duration_minutes` - The effective hold duration in minutes
#[must_use]
pub fn expiry_timestamp(now: OffsetDateTime, duration_minutes: i64) -> String {
    format_timestamp(now + Duration::minutes(duration_minutes))
}

/// Projects the date component (`YYYY-MM-DD`) out of a stored timestamp.
///
/// # Arguments
///
/// * `timestamp` - A fixed-width UTC timestamp
///
/// # Errors
///
/// Returns an error if the timestamp does not parse.
pub fn slot_date(timestamp: &str) -> Result<String, CoreError> {
    let ts: OffsetDateTime = parse_timestamp(timestamp)?;
    Ok(format!(
        "{:04}-{:02}-{:02}",
        ts.year(),
        u8::from(ts.month()),
        ts.day()
    ))
}

/// Projects the time-of-day component (`HH:MM`) out of a stored timestamp.
///
/// # Arguments
///
/// * `timestamp` - A fixed-width UTC timestamp
///
/// # Errors
///
/// Returns an error if the timestamp does not parse.
pub fn slot_time(timestamp: &str) -> Result<String, CoreError> {
    let ts: OffsetDateTime = parse_timestamp(timestamp)?;
    Ok(format!("{:02}:{:02}", ts.hour(), ts.minute()))
}
