// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hold-protocol tests: creation, capacity guard, per-session dedup,
//! release semantics.

use super::{
    create_test_event_with, create_test_persistence, create_test_slot, quantity,
    seed_event_and_slot, session,
};
use crate::{HoldCreated, HoldRow, HoldVerification, Persistence, PersistenceError};
use holdfast_domain::{EventStatus, HoldDuration, Visibility};

#[test]
fn create_hold_returns_id_and_future_expiry() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 5);

    let created: HoldCreated = persistence
        .create_hold(
            slot_id,
            &session("sess-A"),
            quantity(2),
            None,
            HoldDuration::from_request(Some(10)),
        )
        .expect("Hold creation must succeed");

    let row: HoldRow = persistence
        .get_hold(created.hold_id)
        .expect("Query must succeed")
        .expect("Hold row must exist");

    assert_eq!(row.slot_id, slot_id);
    assert_eq!(row.session_id, "sess-A");
    assert_eq!(row.quantity, 2);
    assert_eq!(row.is_active, 1);
    assert_eq!(row.expires_at, created.expires_at);
    assert!(row.expires_at.as_str() > row.created_at.as_str());
}

#[test]
fn hold_on_missing_slot_fails_slot_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let result = persistence.create_hold(
        42,
        &session("sess-A"),
        quantity(1),
        None,
        HoldDuration::default(),
    );

    assert!(matches!(
        result,
        Err(PersistenceError::SlotNotFound { slot_id: 42 })
    ));
}

#[test]
fn hold_on_cancelled_slot_fails_slot_unavailable() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 5);
    persistence
        .cancel_time_slot(slot_id)
        .expect("Cancellation must succeed");

    let result = persistence.create_hold(
        slot_id,
        &session("sess-A"),
        quantity(1),
        None,
        HoldDuration::default(),
    );

    match result {
        Err(PersistenceError::SlotUnavailable { reason, .. }) => {
            assert!(reason.contains("not available"), "got reason: {reason}");
        }
        other => panic!("Expected SlotUnavailable, got: {other:?}"),
    }
}

#[test]
fn hold_under_inactive_event_fails_slot_unavailable() {
    let mut persistence: Persistence = create_test_persistence();
    for status in [EventStatus::Draft, EventStatus::Paused, EventStatus::Cancelled] {
        let event_id: i64 = create_test_event_with(&mut persistence, status, Visibility::Public);
        let slot_id: i64 = create_test_slot(&mut persistence, event_id, 5);

        let result = persistence.create_hold(
            slot_id,
            &session("sess-A"),
            quantity(1),
            None,
            HoldDuration::default(),
        );

        assert!(
            matches!(result, Err(PersistenceError::SlotUnavailable { .. })),
            "status {status:?} must refuse holds"
        );
    }
}

#[test]
fn hold_under_private_event_fails_slot_unavailable() {
    let mut persistence: Persistence = create_test_persistence();
    let event_id: i64 =
        create_test_event_with(&mut persistence, EventStatus::Active, Visibility::Private);
    let slot_id: i64 = create_test_slot(&mut persistence, event_id, 5);

    let result = persistence.create_hold(
        slot_id,
        &session("sess-A"),
        quantity(1),
        None,
        HoldDuration::default(),
    );

    assert!(matches!(
        result,
        Err(PersistenceError::SlotUnavailable { .. })
    ));
}

#[test]
fn second_hold_for_last_seat_fails_capacity() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 1);

    let first = persistence.create_hold(
        slot_id,
        &session("A"),
        quantity(1),
        None,
        HoldDuration::default(),
    );
    let second = persistence.create_hold(
        slot_id,
        &session("B"),
        quantity(1),
        None,
        HoldDuration::default(),
    );

    assert!(first.is_ok(), "First caller must win the seat");
    match second {
        Err(PersistenceError::CapacityExceeded { available, .. }) => {
            assert_eq!(available, 0, "Loser must observe zero availability");
        }
        other => panic!("Expected CapacityExceeded, got: {other:?}"),
    }
}

#[test]
fn oversized_request_reports_observed_availability() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 3);

    persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(2),
            None,
            HoldDuration::default(),
        )
        .expect("First hold must succeed");

    let result = persistence.create_hold(
        slot_id,
        &session("B"),
        quantity(2),
        None,
        HoldDuration::default(),
    );

    match result {
        Err(PersistenceError::CapacityExceeded { available, .. }) => {
            assert_eq!(available, 1);
        }
        other => panic!("Expected CapacityExceeded, got: {other:?}"),
    }
}

#[test]
fn full_capacity_hold_succeeds_on_empty_slot() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 4);

    persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(4),
            None,
            HoldDuration::default(),
        )
        .expect("Whole-slot hold must succeed");

    // Any other session now sees nothing left.
    let result = persistence.create_hold(
        slot_id,
        &session("B"),
        quantity(1),
        None,
        HoldDuration::default(),
    );
    assert!(matches!(
        result,
        Err(PersistenceError::CapacityExceeded { available: 0, .. })
    ));
}

#[test]
fn re_hold_same_session_supersedes_prior() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 3);

    let first: HoldCreated = persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(1),
            None,
            HoldDuration::default(),
        )
        .expect("First hold must succeed");

    // Same session asks again for a different quantity. The prior hold does
    // not count against its own session, so 3 seats are still reachable.
    let second: HoldCreated = persistence
        .create_hold(
            slot_id,
            &session("A"),
            quantity(3),
            None,
            HoldDuration::default(),
        )
        .expect("Replacement hold must succeed");

    let verification: HoldVerification = persistence
        .verify_hold(first.hold_id)
        .expect("Verification must succeed");
    assert!(!verification.is_valid);
    assert_eq!(verification.reason.as_deref(), Some("released"));

    let second_row: HoldRow = persistence
        .get_hold(second.hold_id)
        .expect("Query must succeed")
        .expect("Replacement hold must exist");
    assert_eq!(second_row.is_active, 1);

    // Only the replacement counts toward capacity.
    let result = persistence.create_hold(
        slot_id,
        &session("B"),
        quantity(1),
        None,
        HoldDuration::default(),
    );
    assert!(matches!(
        result,
        Err(PersistenceError::CapacityExceeded { available: 0, .. })
    ));
}

#[test]
fn release_hold_is_idempotent() {
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

    assert!(persistence.release_hold(created.hold_id).expect("Release"));
    assert!(!persistence.release_hold(created.hold_id).expect("Release"));

    let row: HoldRow = persistence
        .get_hold(created.hold_id)
        .expect("Query must succeed")
        .expect("Hold row must be retained for audit");
    assert_eq!(row.is_active, 0);
    assert!(row.released_at.is_some());
}

#[test]
fn release_of_unknown_hold_returns_false() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(!persistence.release_hold(404).expect("Release must not error"));
}

#[test]
fn released_capacity_is_reusable() {
    let mut persistence: Persistence = create_test_persistence();
    let (_event_id, slot_id) = seed_event_and_slot(&mut persistence, 1);

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

    persistence
        .create_hold(
            slot_id,
            &session("B"),
            quantity(1),
            None,
            HoldDuration::default(),
        )
        .expect("Released seat must be reusable");
}
