// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and slot read-backs.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{EventRow, SlotRow};
use crate::diesel_schema::{events, time_slots};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves an event row by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event to retrieve
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_event(conn: &mut _, event_id: i64) -> Result<Option<EventRow>, PersistenceError> {
    events::table
        .filter(events::event_id.eq(event_id))
        .first::<EventRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_event: {e}")))
}
}

backend_fn! {
/// Retrieves a time-slot row by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot_id` - The slot to retrieve
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_time_slot(conn: &mut _, slot_id: i64) -> Result<Option<SlotRow>, PersistenceError> {
    time_slots::table
        .filter(time_slots::slot_id.eq(slot_id))
        .first::<SlotRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_time_slot: {e}")))
}
}

backend_fn! {
/// Lists every time slot of an event, ordered by start time.
///
/// Unlike the availability listing, this includes full, cancelled, and past
/// slots; it is the administrative view.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event whose slots to list
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_time_slots(
    conn: &mut _,
    event_id: i64,
) -> Result<Vec<SlotRow>, PersistenceError> {
    time_slots::table
        .filter(time_slots::event_id.eq(event_id))
        .order(time_slots::start_time.asc())
        .load::<SlotRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_time_slots: {e}")))
}
}
