// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability and pre-flight tests, including own-hold exclusion.

use super::{
    create_test_event, create_test_event_with, create_test_persistence, create_test_slot,
    quantity, seed_event_and_slot, session,
};
use crate::{AvailabilityRow, CanBookResult, Persistence, PersistenceError};
use holdfast_domain::{EventStatus, HoldDuration, Visibility};

#[test]
fn availability_for_missing_event_fails_event_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let result = persistence.list_availability(99, None);
    assert!(matches!(
        result,
        Err(PersistenceError::EventNotFound { event_id: 99 })
    ));
}

#[test]
fn availability_row_carries_slot_shape() {
    let mut persistence: Persistence = create_test_persistence();
    let (event_id, slot_id) = seed_event_and_slot(&mut persistence, 5);

    let rows: Vec<AvailabilityRow> = persistence
        .list_availability(event_id, None)
        .expect("Listing must succeed");

    assert_eq!(rows.len(), 1);
    let row: &AvailabilityRow = &rows[0];
    assert_eq!(row.slot_id, slot_id);
    assert_eq!(row.start_time, super::SLOT_START);
    assert_eq!(row.end_time, super::SLOT_END);
    assert_eq!(row.total_capacity, 5);
    assert_eq!(row.effective_available, 5);
    assert_eq!(row.price, "25.00");
}

#[test]
fn own_holds_are_not_subtracted() {
    let mut persistence: Persistence = create_test_persistence();
    let (event_id, slot_id) = seed_event_and_slot(&mut persistence, 3);

    persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(2),
            None,
            HoldDuration::default(),
        )
        .expect("Hold creation must succeed");

    let for_a: Vec<AvailabilityRow> = persistence
        .list_availability(event_id, Some("A"))
        .expect("Listing must succeed");
    let for_b: Vec<AvailabilityRow> = persistence
        .list_availability(event_id, Some("B"))
        .expect("Listing must succeed");
    let anonymous: Vec<AvailabilityRow> = persistence
        .list_availability(event_id, None)
        .expect("Listing must succeed");

    assert_eq!(for_a[0].effective_available, 3);
    assert_eq!(for_b[0].effective_available, 1);
    assert_eq!(anonymous[0].effective_available, 1);
}

#[test]
fn slots_are_ordered_by_start_time() {
    let mut persistence: Persistence = create_test_persistence();
    let event_id: i64 = create_test_event(&mut persistence);

    let late: i64 = persistence
        .create_time_slot(
            event_id,
            "2099-01-05T14:00:00Z",
            "2099-01-05T15:00:00Z",
            quantity(5),
            &holdfast_domain::Price::zero(),
        )
        .expect("Slot creation must succeed");
    let early: i64 = persistence
        .create_time_slot(
            event_id,
            "2099-01-05T09:00:00Z",
            "2099-01-05T10:00:00Z",
            quantity(5),
            &holdfast_domain::Price::zero(),
        )
        .expect("Slot creation must succeed");

    let rows: Vec<AvailabilityRow> = persistence
        .list_availability(event_id, None)
        .expect("Listing must succeed");

    let listed: Vec<i64> = rows.iter().map(|r| r.slot_id).collect();
    assert_eq!(listed, vec![early, late]);
}

#[test]
fn cancelled_and_fully_booked_slots_are_not_listed() {
    let mut persistence: Persistence = create_test_persistence();
    let event_id: i64 = create_test_event(&mut persistence);
    let cancelled: i64 = create_test_slot(&mut persistence, event_id, 5);
    persistence
        .cancel_time_slot(cancelled)
        .expect("Cancellation must succeed");

    let drained: i64 = persistence
        .create_time_slot(
            event_id,
            "2099-01-06T09:00:00Z",
            "2099-01-06T10:00:00Z",
            quantity(2),
            &holdfast_domain::Price::zero(),
        )
        .expect("Slot creation must succeed");
    persistence
        .set_slot_booked_count(drained, 2)
        .expect("Out-of-band update must succeed");

    let rows: Vec<AvailabilityRow> = persistence
        .list_availability(event_id, None)
        .expect("Listing must succeed");
    assert!(rows.is_empty());
}

#[test]
fn can_book_reports_missing_event() {
    let mut persistence: Persistence = create_test_persistence();
    let result: CanBookResult = persistence
        .can_book(404, quantity(1))
        .expect("Pre-flight must not error");
    assert!(!result.can_book);
    assert_eq!(result.reason.as_deref(), Some("event not found"));
    assert_eq!(result.available_slot_count, 0);
}

#[test]
fn can_book_refuses_inactive_and_private_events() {
    let mut persistence: Persistence = create_test_persistence();

    let paused: i64 =
        create_test_event_with(&mut persistence, EventStatus::Paused, Visibility::Public);
    create_test_slot(&mut persistence, paused, 5);
    let result: CanBookResult = persistence
        .can_book(paused, quantity(1))
        .expect("Pre-flight must not error");
    assert!(!result.can_book);
    assert_eq!(result.reason.as_deref(), Some("event is not active"));

    let private: i64 =
        create_test_event_with(&mut persistence, EventStatus::Active, Visibility::Private);
    create_test_slot(&mut persistence, private, 5);
    let result: CanBookResult = persistence
        .can_book(private, quantity(1))
        .expect("Pre-flight must not error");
    assert!(!result.can_book);
    assert_eq!(
        result.reason.as_deref(),
        Some("event is not open for booking")
    );
}

#[test]
fn can_book_accepts_unlisted_and_protected_visibilities() {
    let mut persistence: Persistence = create_test_persistence();
    for visibility in [Visibility::Unlisted, Visibility::Protected] {
        let event_id: i64 =
            create_test_event_with(&mut persistence, EventStatus::Active, visibility);
        create_test_slot(&mut persistence, event_id, 5);

        let result: CanBookResult = persistence
            .can_book(event_id, quantity(1))
            .expect("Pre-flight must not error");
        assert!(result.can_book, "visibility {visibility:?} must be bookable");
        assert_eq!(result.available_slot_count, 1);
        assert_eq!(result.reason, None);
    }
}

#[test]
fn can_book_counts_only_slots_that_fit_the_quantity() {
    let mut persistence: Persistence = create_test_persistence();
    let event_id: i64 = create_test_event(&mut persistence);
    create_test_slot(&mut persistence, event_id, 2);
    persistence
        .create_time_slot(
            event_id,
            "2099-01-07T09:00:00Z",
            "2099-01-07T10:00:00Z",
            quantity(6),
            &holdfast_domain::Price::zero(),
        )
        .expect("Slot creation must succeed");

    let for_two: CanBookResult = persistence
        .can_book(event_id, quantity(2))
        .expect("Pre-flight must not error");
    assert!(for_two.can_book);
    assert_eq!(for_two.available_slot_count, 2);

    let for_four: CanBookResult = persistence
        .can_book(event_id, quantity(4))
        .expect("Pre-flight must not error");
    assert!(for_four.can_book);
    assert_eq!(for_four.available_slot_count, 1);

    let for_ten: CanBookResult = persistence
        .can_book(event_id, quantity(10))
        .expect("Pre-flight must not error");
    assert!(!for_ten.can_book);
    assert_eq!(for_ten.available_slot_count, 0);
    assert_eq!(for_ten.reason, None);
}

#[test]
fn can_book_is_session_agnostic() {
    let mut persistence: Persistence = create_test_persistence();
    let (event_id, slot_id) = seed_event_and_slot(&mut persistence, 2);

    persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(2),
            None,
            HoldDuration::default(),
        )
        .expect("Hold creation must succeed");

    // The pre-flight counts everyone's holds, including session A's own.
    let result: CanBookResult = persistence
        .can_book(event_id, quantity(1))
        .expect("Pre-flight must not error");
    assert!(!result.can_book);
    assert_eq!(result.available_slot_count, 0);
}
