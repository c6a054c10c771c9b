// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and time-slot administration.
//!
//! These mutations seed and maintain the catalog the reservation core sells
//! from. They are not part of the hot reservation path and take no part in
//! the capacity protocol; `set_slot_booked_count` in particular is the
//! out-of-band import path whose drift the confirm-time residual guard
//! exists to catch.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{events, time_slots};
use crate::error::PersistenceError;

backend_fn! {
/// Creates an event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - The event's display name
/// * `status` - The event's status string
/// * `visibility` - The event's visibility string
/// * `schedule_weekdays` - Weekday template for the slot generator, if any
/// * `window_open_time` - Daily window open time for the generator, if any
/// * `window_close_time` - Daily window close time for the generator, if any
/// * `now` - The creation timestamp (fixed-width UTC text)
///
/// # Errors
///
/// Returns an error if the database insert fails.
#[allow(clippy::too_many_arguments)]
pub fn create_event(
    conn: &mut _,
    name: &str,
    status: &str,
    visibility: &str,
    schedule_weekdays: Option<&str>,
    window_open_time: Option<&str>,
    window_close_time: Option<&str>,
    now: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(events::table)
        .values((
            events::name.eq(name),
            events::status.eq(status),
            events::visibility.eq(visibility),
            events::schedule_weekdays.eq(schedule_weekdays),
            events::window_open_time.eq(window_open_time),
            events::window_close_time.eq(window_close_time),
            events::created_at.eq(now),
        ))
        .execute(conn)?;

    let event_id: i64 = conn.get_last_insert_rowid()?;

    info!(event_id, name, "Created event");

    Ok(event_id)
}
}

backend_fn! {
/// Creates a time slot under an event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The owning event
/// * `start_time` - The slot's start (fixed-width UTC text)
/// * `end_time` - The slot's end (fixed-width UTC text)
/// * `total_capacity` - The immutable seat capacity (validated positive upstream)
/// * `price` - The slot price as a decimal string
/// * `now` - The creation timestamp (fixed-width UTC text)
///
/// # Errors
///
/// Returns `EventNotFound` if the owning event does not exist, or a storage
/// error.
pub fn create_time_slot(
    conn: &mut _,
    event_id: i64,
    start_time: &str,
    end_time: &str,
    total_capacity: i32,
    price: &str,
    now: &str,
) -> Result<i64, PersistenceError> {
    let event_exists: i64 = events::table
        .filter(events::event_id.eq(event_id))
        .count()
        .get_result(conn)?;
    if event_exists == 0 {
        return Err(PersistenceError::EventNotFound { event_id });
    }

    diesel::insert_into(time_slots::table)
        .values((
            time_slots::event_id.eq(event_id),
            time_slots::start_time.eq(start_time),
            time_slots::end_time.eq(end_time),
            time_slots::total_capacity.eq(total_capacity),
            time_slots::booked_count.eq(0),
            time_slots::status.eq("available"),
            time_slots::price.eq(price),
            time_slots::created_at.eq(now),
        ))
        .execute(conn)?;

    let slot_id: i64 = conn.get_last_insert_rowid()?;

    info!(slot_id, event_id, total_capacity, "Created time slot");

    Ok(slot_id)
}
}

backend_fn! {
/// Overwrites a slot's booked count directly.
///
/// Out-of-band import path: no status reconciliation, no capacity guard.
/// The confirm-time residual guard is what protects the oversell invariant
/// against drift introduced here.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot_id` - The slot to update
/// * `booked_count` - The new booked count
///
/// # Errors
///
/// Returns `SlotNotFound` if the slot does not exist, or a storage error.
pub fn set_slot_booked_count(
    conn: &mut _,
    slot_id: i64,
    booked_count: i32,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(time_slots::table)
        .filter(time_slots::slot_id.eq(slot_id))
        .set(time_slots::booked_count.eq(booked_count))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::SlotNotFound { slot_id });
    }

    info!(slot_id, booked_count, "Set slot booked count out-of-band");

    Ok(())
}
}

backend_fn! {
/// Cancels a time slot.
///
/// Existing bookings are left untouched; the slot simply refuses new holds.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot_id` - The slot to cancel
///
/// # Errors
///
/// Returns `SlotNotFound` if the slot does not exist, or a storage error.
pub fn cancel_time_slot(conn: &mut _, slot_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(time_slots::table)
        .filter(time_slots::slot_id.eq(slot_id))
        .set(time_slots::status.eq("cancelled"))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::SlotNotFound { slot_id });
    }

    info!(slot_id, "Cancelled time slot");

    Ok(())
}
}
