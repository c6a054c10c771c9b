// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CoreError, expiry_timestamp, format_timestamp, now_timestamp, parse_timestamp, slot_date,
    slot_time,
};
use time::OffsetDateTime;

#[test]
fn timestamps_are_fixed_width() {
    let ts: String = now_timestamp();
    assert_eq!(ts.len(), 20);
    assert!(ts.ends_with('Z'));
    assert_eq!(&ts[10..11], "T");
}

#[test]
fn format_and_parse_round_trip() {
    let original: &str = "2026-08-02T09:30:00Z";
    let parsed: OffsetDateTime = parse_timestamp(original).expect("valid timestamp");
    assert_eq!(format_timestamp(parsed), original);
}

#[test]
fn lexicographic_order_matches_chronological_order() {
    let earlier: &str = "2026-08-02T09:59:59Z";
    let later: &str = "2026-08-02T10:00:00Z";
    let much_later: &str = "2026-12-01T00:00:00Z";
    assert!(earlier < later);
    assert!(later < much_later);
}

#[test]
fn garbage_timestamps_are_rejected() {
    for value in ["", "2026-08-02", "02/08/2026 10:00", "2026-08-02 10:00:00"] {
        assert_eq!(
            parse_timestamp(value),
            Err(CoreError::InvalidTimestamp {
                value: value.to_string()
            })
        );
    }
}

#[test]
fn expiry_is_duration_minutes_after_now() {
    let now: OffsetDateTime =
        parse_timestamp("2026-08-02T10:00:00Z").expect("valid timestamp");
    assert_eq!(expiry_timestamp(now, 10), "2026-08-02T10:10:00Z");
    assert_eq!(expiry_timestamp(now, 1), "2026-08-02T10:01:00Z");
    assert_eq!(expiry_timestamp(now, 60), "2026-08-02T11:00:00Z");
}

#[test]
fn slot_date_and_time_project_from_start_time() {
    assert_eq!(
        slot_date("2026-08-03T09:30:00Z").expect("valid"),
        "2026-08-03"
    );
    assert_eq!(slot_time("2026-08-03T09:30:00Z").expect("valid"), "09:30");
}
