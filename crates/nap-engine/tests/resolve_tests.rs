//! Tests for wall-clock time and UTC offset resolution.

use chrono::{FixedOffset, TimeZone, Timelike, Utc};
use nap_engine::error::NapError;
use nap_engine::resolve::{parse_time_of_day, parse_utc_offset, resolve};

fn offset(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap()
}

#[test]
fn parses_hours_and_minutes() {
    assert_eq!(parse_time_of_day("07:30").unwrap(), (7, 30, 0));
    assert_eq!(parse_time_of_day("00:00").unwrap(), (0, 0, 0));
    assert_eq!(parse_time_of_day("23:59").unwrap(), (23, 59, 0));
}

#[test]
fn parses_optional_seconds() {
    assert_eq!(parse_time_of_day("07:30:15").unwrap(), (7, 30, 15));
    assert_eq!(parse_time_of_day("07:30:59").unwrap(), (7, 30, 59));
}

#[test]
fn rejects_malformed_times() {
    for text in ["25:00", "07:60", "07:30:61", "7", "", "ab:cd", "1:2:3:4"] {
        let err = parse_time_of_day(text).unwrap_err();
        assert_eq!(
            err,
            NapError::InvalidTimeFormat(text.to_string()),
            "{text:?} should be rejected with the offending text attached"
        );
    }
}

#[test]
fn parses_signed_offsets() {
    assert_eq!(parse_utc_offset("-07:00").unwrap(), offset(-7));
    assert_eq!(parse_utc_offset("+01:00").unwrap(), offset(1));
    assert_eq!(parse_utc_offset("+00:00").unwrap(), offset(0));
    assert_eq!(
        parse_utc_offset("+05:30").unwrap(),
        FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
    );
}

#[test]
fn rejects_malformed_offsets() {
    for text in ["0700", "+25:00", "+07:60", "seven", "", "+-1:00"] {
        let err = parse_utc_offset(text).unwrap_err();
        assert!(
            matches!(err, NapError::InvalidOffset(_)),
            "{text:?} should be rejected as an invalid offset"
        );
    }
}

#[test]
fn inherits_the_date_from_the_reference_instant() {
    // 2026-03-21 04:30 UTC is still 2026-03-20 in the -07:00 offset.
    let reference = Utc
        .with_ymd_and_hms(2026, 3, 21, 4, 30, 0)
        .unwrap()
        .with_timezone(&offset(-7));

    let resolved = resolve("05:00", offset(-7), Some(reference)).unwrap();

    assert_eq!(
        resolved.format("%Y-%m-%d %H:%M").to_string(),
        "2026-03-20 05:00",
        "the wall clock should land on the reference's local calendar day"
    );
}

#[test]
fn seconds_default_to_zero() {
    let reference = Utc
        .with_ymd_and_hms(2026, 3, 20, 12, 34, 56)
        .unwrap()
        .with_timezone(&offset(0));

    let resolved = resolve("08:15", offset(0), Some(reference)).unwrap();

    assert_eq!(resolved.second(), 0);
    assert_eq!(resolved.nanosecond(), 0);
}

#[test]
fn malformed_time_propagates_from_resolve() {
    let err = resolve("25:00", offset(0), None).unwrap_err();
    assert_eq!(err, NapError::InvalidTimeFormat("25:00".to_string()));
}

#[test]
fn display_offset_round_trip_preserves_the_wall_clock() {
    let home = offset(-7);
    let dest = offset(1);
    let reference = Utc
        .with_ymd_and_hms(2026, 3, 20, 12, 0, 0)
        .unwrap()
        .with_timezone(&home);

    let resolved = resolve("21:30", home, Some(reference)).unwrap();
    let round_tripped = resolved.with_timezone(&dest).with_timezone(&home);

    // Same absolute instant throughout; same wall clock once back home.
    assert_eq!(round_tripped, resolved);
    assert_eq!(round_tripped.hour(), 21);
    assert_eq!(round_tripped.minute(), 30);
}
