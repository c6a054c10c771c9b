// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking and attempt read-backs.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{AttemptRow, BookingRow};
use crate::diesel_schema::{booking_attempts, bookings};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a booking row by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `booking_id` - The booking to retrieve
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_booking(
    conn: &mut _,
    booking_id: i64,
) -> Result<Option<BookingRow>, PersistenceError> {
    bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .first::<BookingRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_booking: {e}")))
}
}

backend_fn! {
/// Lists the attempt records for a slot in insertion order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot_id` - The slot whose attempts to list
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_attempts_for_slot(
    conn: &mut _,
    slot_id: i64,
) -> Result<Vec<AttemptRow>, PersistenceError> {
    booking_attempts::table
        .filter(booking_attempts::slot_id.eq(slot_id))
        .order(booking_attempts::attempt_id.asc())
        .load::<AttemptRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_attempts_for_slot: {e}")))
}
}
