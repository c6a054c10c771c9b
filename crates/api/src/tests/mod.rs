// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use holdfast_persistence::Persistence;

use crate::request_response::{
    ConfirmBookingRequest, CreateEventRequest, CreateHoldRequest, CreateTimeSlotRequest,
};
use crate::{create_event, create_time_slot};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Seeds an active public event with one five-seat slot through the API
/// surface, returning `(event_id, slot_id)`.
pub fn seed_event_and_slot(persistence: &mut Persistence) -> (i64, i64) {
    seed_event_and_slot_with_capacity(persistence, 5)
}

pub fn seed_event_and_slot_with_capacity(
    persistence: &mut Persistence,
    total_capacity: i32,
) -> (i64, i64) {
    let event = create_event(
        persistence,
        &CreateEventRequest {
            name: String::from("Intro Workshop"),
            status: String::from("active"),
            visibility: String::from("public"),
            schedule_weekdays: None,
            window_open_time: None,
            window_close_time: None,
        },
    )
    .expect("Event creation must succeed");

    let slot = create_time_slot(
        persistence,
        &CreateTimeSlotRequest {
            event_id: event.event_id,
            start_time: String::from("2099-01-04T09:00:00Z"),
            end_time: String::from("2099-01-04T10:00:00Z"),
            total_capacity,
            price: String::from("25.00"),
        },
    )
    .expect("Slot creation must succeed");

    (event.event_id, slot.slot_id)
}

pub fn hold_request(slot_id: i64, session_id: &str, quantity: i32) -> CreateHoldRequest {
    CreateHoldRequest {
        slot_id,
        session_id: session_id.to_string(),
        quantity,
        user_id: None,
        duration_min: None,
    }
}

pub fn confirm_request(hold_id: i64, session_id: &str) -> ConfirmBookingRequest {
    ConfirmBookingRequest {
        hold_id,
        session_id: session_id.to_string(),
        first_name: String::from("Ada"),
        last_name: String::from("Lovelace"),
        email: String::from("ada@example.org"),
        phone: None,
        notes: None,
    }
}
