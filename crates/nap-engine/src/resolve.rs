//! Wall-clock time resolution against a fixed UTC offset.
//!
//! Converts an `HH:MM[:SS]` string plus a fixed UTC offset (and an optional
//! reference instant) into an absolute `DateTime<FixedOffset>`. The date
//! portion is inherited from the reference instant, so callers can anchor a
//! preference like "usual wake time" to the calendar day of a flight.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::error::{NapError, Result};

/// Parse an `HH:MM` or `HH:MM:SS` string into validated clock fields.
///
/// Seconds default to 0 when omitted.
///
/// # Errors
/// Returns `NapError::InvalidTimeFormat` when the shape is wrong, a component
/// is not a number, or a component is out of range (`HH` ≤ 23, `MM`/`SS` ≤ 59).
pub fn parse_time_of_day(text: &str) -> Result<(u32, u32, u32)> {
    let invalid = || NapError::InvalidTimeFormat(text.to_string());

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(invalid());
    }

    let hour: u32 = parts[0].parse().map_err(|_| invalid())?;
    let minute: u32 = parts[1].parse().map_err(|_| invalid())?;
    let second: u32 = match parts.get(2) {
        Some(raw) => raw.parse().map_err(|_| invalid())?,
        None => 0,
    };

    if hour > 23 || minute > 59 || second > 59 {
        return Err(invalid());
    }

    Ok((hour, minute, second))
}

/// Parse a signed `±HH:MM` UTC offset string into a `FixedOffset`.
///
/// A missing sign is read as east of UTC.
///
/// # Errors
/// Returns `NapError::InvalidOffset` when the shape is wrong or the offset
/// is outside the range chrono accepts.
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset> {
    let invalid = || NapError::InvalidOffset(text.to_string());

    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1i32, rest),
        None => (1i32, text.strip_prefix('+').unwrap_or(text)),
    };

    let (raw_hours, raw_minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = raw_hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = raw_minutes.parse().map_err(|_| invalid())?;

    if hours > 23 || minutes > 59 || raw_hours.starts_with('-') || raw_minutes.starts_with('-') {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Resolve a wall-clock time string into an absolute instant.
///
/// Starts from `reference` (or the current instant when `None`), views it in
/// `offset`, and replaces the hour/minute/second fields so the string is read
/// as local wall-clock time in that offset. The calendar date comes from the
/// reference instant.
///
/// # Errors
/// Returns `NapError::InvalidTimeFormat` for malformed time strings.
pub fn resolve(
    time: &str,
    offset: FixedOffset,
    reference: Option<DateTime<FixedOffset>>,
) -> Result<DateTime<FixedOffset>> {
    let (hour, minute, second) = parse_time_of_day(time)?;

    let base = reference
        .unwrap_or_else(|| Utc::now().with_timezone(&offset))
        .with_timezone(&offset);

    base.with_hour(hour)
        .and_then(|dt| dt.with_minute(minute))
        .and_then(|dt| dt.with_second(second))
        .and_then(|dt| dt.with_nanosecond(0))
        .ok_or_else(|| NapError::InvalidTimeFormat(time.to_string()))
}
