// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod availability_tests;
mod booking_tests;
mod hold_tests;

use std::str::FromStr;

use diesel::prelude::*;
use holdfast_domain::{Attendee, EventStatus, Price, Quantity, SessionId, Visibility};

use crate::diesel_schema::holds;
use crate::{BackendConnection, Persistence};

/// A start time far enough in the future that tests never race the clock.
pub const SLOT_START: &str = "2099-01-04T09:00:00Z";

/// The matching end time.
pub const SLOT_END: &str = "2099-01-04T10:00:00Z";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn session(value: &str) -> SessionId {
    SessionId::new(value).expect("Valid test session id")
}

pub fn quantity(value: i32) -> Quantity {
    Quantity::new(value).expect("Valid test quantity")
}

pub fn create_test_attendee() -> Attendee {
    Attendee::new("Ada", "Lovelace", "ada@example.org", None, None)
        .expect("Valid test attendee")
}

/// Creates an active public event.
pub fn create_test_event(persistence: &mut Persistence) -> i64 {
    create_test_event_with(persistence, EventStatus::Active, Visibility::Public)
}

/// Creates an event with a specific status and visibility.
pub fn create_test_event_with(
    persistence: &mut Persistence,
    status: EventStatus,
    visibility: Visibility,
) -> i64 {
    persistence
        .create_event("Intro Workshop", status, visibility, Some("1,2,3"), None, None)
        .expect("Failed to create test event")
}

/// Creates a bookable slot with the given capacity under an event.
pub fn create_test_slot(persistence: &mut Persistence, event_id: i64, capacity: i32) -> i64 {
    persistence
        .create_time_slot(
            event_id,
            SLOT_START,
            SLOT_END,
            quantity(capacity),
            &Price::from_str("25.00").expect("Valid test price"),
        )
        .expect("Failed to create test slot")
}

/// Seeds an active public event with one slot, returning `(event_id, slot_id)`.
pub fn seed_event_and_slot(persistence: &mut Persistence, capacity: i32) -> (i64, i64) {
    let event_id: i64 = create_test_event(persistence);
    let slot_id: i64 = create_test_slot(persistence, event_id, capacity);
    (event_id, slot_id)
}

/// Rewrites a hold's expiry into the past, simulating a hold that was
/// created with a short duration and then waited out.
pub fn force_expire_hold(persistence: &mut Persistence, hold_id: i64) {
    let BackendConnection::Sqlite(conn) = &mut persistence.conn else {
        panic!("Test helper supports the SQLite backend only");
    };
    diesel::update(holds::table)
        .filter(holds::hold_id.eq(hold_id))
        .set(holds::expires_at.eq("2000-01-01T00:00:00Z"))
        .execute(conn)
        .expect("Failed to force-expire hold");
}
