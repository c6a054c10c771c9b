// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking-finaliser tests: the happy path, the residual capacity guard,
//! terminal hold consumption, and the attempt trail.

use super::{
    create_test_attendee, create_test_persistence, quantity, seed_event_and_slot, session,
};
use crate::{
    AttemptRow, BookingConfirmed, BookingRow, HoldCreated, HoldRow, Persistence,
    PersistenceError, SlotRow,
};
use holdfast::is_booking_reference;
use holdfast_domain::{Attendee, HoldDuration};

#[test]
fn confirm_converts_hold_and_bumps_booked_count() {
    let mut persistence: Persistence = create_test_persistence();
    let (event_id, slot_id) = seed_event_and_slot(&mut persistence, 5);

    let created: HoldCreated = persistence
        .create_hold(
            slot_id,
            &session("sess-A"),
            quantity(2),
            Some(7),
            HoldDuration::from_request(Some(10)),
        )
        .expect("Hold creation must succeed");

    let confirmed: BookingConfirmed = persistence
        .confirm_booking(created.hold_id, &create_test_attendee())
        .expect("Confirmation must succeed");

    assert!(
        is_booking_reference(&confirmed.booking_reference),
        "reference '{}' must match ^[A-Z0-9]{{8}}$",
        confirmed.booking_reference
    );

    let booking: BookingRow = persistence
        .get_booking(confirmed.booking_id)
        .expect("Query must succeed")
        .expect("Booking row must exist");
    assert_eq!(booking.event_id, event_id);
    assert_eq!(booking.slot_id, slot_id);
    assert_eq!(booking.user_id, Some(7));
    assert_eq!(booking.first_name, "Ada");
    assert_eq!(booking.last_name, "Lovelace");
    assert_eq!(booking.email, "ada@example.org");
    assert_eq!(booking.status, "confirmed");
    assert_eq!(booking.slot_date, "2099-01-04");
    assert_eq!(booking.slot_time, "09:00");

    let slot: SlotRow = persistence
        .get_time_slot(slot_id)
        .expect("Query must succeed")
        .expect("Slot row must exist");
    assert_eq!(slot.booked_count, 2);
    assert_eq!(slot.status, "available");

    let hold: HoldRow = persistence
        .get_hold(created.hold_id)
        .expect("Query must succeed")
        .expect("Hold row must exist");
    assert_eq!(hold.is_active, 0, "Consumed hold must be inactive");

    let attempts: Vec<AttemptRow> = persistence
        .list_attempts_for_slot(slot_id)
        .expect("Query must succeed");
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].status, "success");
    assert_eq!(attempts[0].email, "ada@example.org");
    assert_eq!(attempts[0].failure_reason, None);
}

#[test]
fn confirming_the_last_seat_flips_the_slot_to_full() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 2);

    let created: HoldCreated = persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(2),
            None,
            HoldDuration::default(),
        )
        .expect("Hold creation must succeed");
    persistence
        .confirm_booking(created.hold_id, &create_test_attendee())
        .expect("Confirmation must succeed");

    let slot: SlotRow = persistence
        .get_time_slot(slot_id)
        .expect("Query must succeed")
        .expect("Slot row must exist");
    assert_eq!(slot.booked_count, 2);
    assert_eq!(slot.status, "full", "status must be full iff nothing is left");
}

#[test]
fn confirm_is_not_repeatable() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 5);

    let created: HoldCreated = persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(1),
            None,
            HoldDuration::default(),
        )
        .expect("Hold creation must succeed");
    persistence
        .confirm_booking(created.hold_id, &create_test_attendee())
        .expect("First confirmation must succeed");

    let result = persistence.confirm_booking(created.hold_id, &create_test_attendee());
    match result {
        Err(PersistenceError::HoldInvalid { reason, .. }) => {
            assert_eq!(reason, "released");
        }
        other => panic!("Expected HoldInvalid, got: {other:?}"),
    }

    // The double confirm must not double-book.
    let slot: SlotRow = persistence
        .get_time_slot(slot_id)
        .expect("Query must succeed")
        .expect("Slot row must exist");
    assert_eq!(slot.booked_count, 1);
}

#[test]
fn confirm_of_unknown_hold_fails_hold_invalid() {
    let mut persistence: Persistence = create_test_persistence();
    let result = persistence.confirm_booking(404, &create_test_attendee());
    match result {
        Err(PersistenceError::HoldInvalid { reason, .. }) => {
            assert_eq!(reason, "not found");
        }
        other => panic!("Expected HoldInvalid, got: {other:?}"),
    }
}

#[test]
fn confirm_of_released_hold_fails_hold_invalid() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 3);

    let created: HoldCreated = persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(1),
            None,
            HoldDuration::default(),
        )
        .expect("Hold creation must succeed");
    persistence
        .release_hold(created.hold_id)
        .expect("Release must succeed");

    let result = persistence.confirm_booking(created.hold_id, &create_test_attendee());
    assert!(matches!(
        result,
        Err(PersistenceError::HoldInvalid { .. })
    ));
}

#[test]
fn confirm_fails_when_booked_count_drifted() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 2);

    let created: HoldCreated = persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(1),
            None,
            HoldDuration::default(),
        )
        .expect("Hold creation must succeed");

    // External import fills the slot behind the hold's back.
    persistence
        .set_slot_booked_count(slot_id, 2)
        .expect("Out-of-band update must succeed");

    let result = persistence.confirm_booking(created.hold_id, &create_test_attendee());
    match result {
        Err(PersistenceError::CapacityExceeded { available, .. }) => {
            assert_eq!(available, 0);
        }
        other => panic!("Expected CapacityExceeded, got: {other:?}"),
    }

    // No booking was written; the failed attempt was.
    let slot: SlotRow = persistence
        .get_time_slot(slot_id)
        .expect("Query must succeed")
        .expect("Slot row must exist");
    assert_eq!(slot.booked_count, 2);

    let attempts: Vec<AttemptRow> = persistence
        .list_attempts_for_slot(slot_id)
        .expect("Query must succeed");
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].status, "failed");
    assert_eq!(
        attempts[0].failure_reason.as_deref(),
        Some("capacity_exceeded")
    );
}

#[test]
fn failed_confirm_of_expired_hold_leaves_a_failed_attempt() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 2);

    let created: HoldCreated = persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(1),
            None,
            HoldDuration::default(),
        )
        .expect("Hold creation must succeed");
    super::force_expire_hold(&mut persistence, created.hold_id);

    let result = persistence.confirm_booking(created.hold_id, &create_test_attendee());
    assert!(matches!(result, Err(PersistenceError::HoldInvalid { .. })));

    let attempts: Vec<AttemptRow> = persistence
        .list_attempts_for_slot(slot_id)
        .expect("Query must succeed");
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].status, "failed");
    assert_eq!(attempts[0].failure_reason.as_deref(), Some("hold_expired"));
}

#[test]
fn booking_references_are_distinct() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 10);

    let mut references: Vec<String> = Vec::new();
    for i in 0..5 {
        let sid = session(&format!("sess-{i}"));
        let created: HoldCreated = persistence
            .create_hold(slot_id, &sid, quantity(1), None, HoldDuration::default())
            .expect("Hold creation must succeed");
        let confirmed: BookingConfirmed = persistence
            .confirm_booking(created.hold_id, &create_test_attendee())
            .expect("Confirmation must succeed");
        references.push(confirmed.booking_reference);
    }

    let mut deduped: Vec<String> = references.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), references.len());
}

#[test]
fn anonymous_hold_produces_anonymous_booking() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 2);

    let created: HoldCreated = persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(1),
            None,
            HoldDuration::default(),
        )
        .expect("Hold creation must succeed");

    let attendee: Attendee = Attendee::new(
        "Grace",
        "Hopper",
        "grace@example.org",
        Some("+1 555 0100"),
        Some("window seat please"),
    )
    .expect("Valid attendee");

    let confirmed: BookingConfirmed = persistence
        .confirm_booking(created.hold_id, &attendee)
        .expect("Confirmation must succeed");

    let booking: BookingRow = persistence
        .get_booking(confirmed.booking_id)
        .expect("Query must succeed")
        .expect("Booking row must exist");
    assert_eq!(booking.user_id, None);
    assert_eq!(booking.phone.as_deref(), Some("+1 555 0100"));
    assert_eq!(booking.notes.as_deref(), Some("window seat please"));
}

#[test]
fn released_then_reheld_seat_confirms_for_the_new_session() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 1);

    let first: HoldCreated = persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(1),
            None,
            HoldDuration::default(),
        )
        .expect("Hold creation must succeed");
    persistence
        .release_hold(first.hold_id)
        .expect("Release must succeed");

    let second: HoldCreated = persistence
        .create_hold(
            slot_id,
            &session("B"),
            quantity(1),
            None,
            HoldDuration::default(),
        )
        .expect("Hold creation must succeed");
    persistence
        .confirm_booking(second.hold_id, &create_test_attendee())
        .expect("Confirmation must succeed");

    let slot: SlotRow = persistence
        .get_time_slot(slot_id)
        .expect("Query must succeed")
        .expect("Slot row must exist");
    assert_eq!(slot.booked_count, 1);
    assert_eq!(slot.status, "full");
}

#[test]
fn abandoned_attempts_from_outer_layers_are_recorded() {
    let mut persistence: Persistence = create_test_persistence();
    let (event_id, slot_id) = seed_event_and_slot(&mut persistence, 2);

    let attempt = holdfast_audit::BookingAttempt {
        event_id,
        slot_id,
        user_id: None,
        email: String::from("ada@example.org"),
        status: holdfast_audit::AttemptStatus::Abandoned,
        failure_reason: None,
        attempted_at: holdfast::now_timestamp(),
    };
    persistence
        .record_attempt(&attempt)
        .expect("Attempt insert must succeed");

    let attempts: Vec<AttemptRow> = persistence
        .list_attempts_for_slot(slot_id)
        .expect("Query must succeed");
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].status, "abandoned");
    assert_eq!(attempts[0].failure_reason, None);
}
