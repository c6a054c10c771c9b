// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The availability listing and the `can_book` pre-flight.
//!
//! Both queries load the candidate slot rows and their active holds, then
//! hand the arithmetic to the core. Expiry is filtered in the core against
//! the operation's captured "now"; the rows' `is_active` flag alone is
//! never trusted.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use holdfast::{HoldState, SlotState, effective_available};
use holdfast_domain::{EventStatus, Visibility};
use std::str::FromStr;

use crate::data_models::{AvailabilityRow, CanBookResult, EventRow, HoldRow, SlotRow};
use crate::diesel_schema::{events, holds, time_slots};
use crate::error::PersistenceError;

backend_fn! {
/// Lists bookable slots of an event with per-caller effective availability.
///
/// Emits one row per slot satisfying `status = 'available'`, a future start
/// time, and remaining unbooked seats, ordered by start time ascending. The
/// caller's own live holds are excluded from the subtraction, so a session
/// refreshing mid-booking sees the seats it is holding as still available
/// to itself. Rows whose effective availability has gone non-positive under
/// overlapping holds are still emitted; callers filter.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event to list
/// * `session_id` - The caller's session, if any
/// * `now` - The operation's captured "now" (fixed-width UTC text)
///
/// # Errors
///
/// Returns `EventNotFound` if the event does not exist, or a storage error.
pub fn list_availability(
    conn: &mut _,
    event_id: i64,
    session_id: Option<&str>,
    now: &str,
) -> Result<Vec<AvailabilityRow>, PersistenceError> {
    let event_exists: i64 = events::table
        .filter(events::event_id.eq(event_id))
        .count()
        .get_result(conn)?;
    if event_exists == 0 {
        return Err(PersistenceError::EventNotFound { event_id });
    }

    let slot_rows: Vec<SlotRow> = time_slots::table
        .filter(time_slots::event_id.eq(event_id))
        .filter(time_slots::status.eq("available"))
        .filter(time_slots::start_time.gt(now))
        .order(time_slots::start_time.asc())
        .load::<SlotRow>(conn)?;

    let slot_rows: Vec<SlotRow> = slot_rows
        .into_iter()
        .filter(|s| s.booked_count < s.total_capacity)
        .collect();

    let slot_ids: Vec<i64> = slot_rows.iter().map(|s| s.slot_id).collect();
    let hold_rows: Vec<HoldRow> = holds::table
        .filter(holds::slot_id.eq_any(slot_ids))
        .filter(holds::is_active.eq(1))
        .load::<HoldRow>(conn)?;

    let mut rows: Vec<AvailabilityRow> = Vec::with_capacity(slot_rows.len());
    for slot_row in &slot_rows {
        let slot_state: SlotState = slot_row.to_state()?;
        let slot_holds: Vec<HoldState> = hold_rows
            .iter()
            .filter(|h| h.slot_id == slot_row.slot_id)
            .map(HoldRow::to_state)
            .collect();

        let available: i64 = effective_available(&slot_state, &slot_holds, now, session_id);

        rows.push(AvailabilityRow {
            slot_id: slot_row.slot_id,
            start_time: slot_row.start_time.clone(),
            end_time: slot_row.end_time.clone(),
            total_capacity: slot_row.total_capacity,
            effective_available: available,
            price: slot_row.price.clone(),
        });
    }

    Ok(rows)
}
}

backend_fn! {
/// Pre-flight check: could anyone book `quantity` seats on this event?
///
/// Never fails for domain reasons: an unbookable event is reported as
/// `(false, reason, 0)`. The availability formula is session-agnostic, so
/// no caller's holds are excluded.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event to check
/// * `quantity` - Seats the caller wants (validated positive upstream)
/// * `now` - The operation's captured "now" (fixed-width UTC text)
///
/// # Errors
///
/// Returns an error only on storage failure.
pub fn can_book(
    conn: &mut _,
    event_id: i64,
    quantity: i32,
    now: &str,
) -> Result<CanBookResult, PersistenceError> {
    let event_row: Option<EventRow> = events::table
        .filter(events::event_id.eq(event_id))
        .first::<EventRow>(conn)
        .optional()?;

    let Some(event_row) = event_row else {
        return Ok(CanBookResult::refused("event not found"));
    };

    let status: EventStatus = EventStatus::from_str(&event_row.status)?;
    if !status.is_active() {
        return Ok(CanBookResult::refused("event is not active"));
    }

    let visibility: Visibility = Visibility::from_str(&event_row.visibility)?;
    if !visibility.is_bookable() {
        return Ok(CanBookResult::refused("event is not open for booking"));
    }

    let slot_rows: Vec<SlotRow> = time_slots::table
        .filter(time_slots::event_id.eq(event_id))
        .filter(time_slots::status.eq("available"))
        .filter(time_slots::start_time.gt(now))
        .load::<SlotRow>(conn)?;

    let slot_ids: Vec<i64> = slot_rows.iter().map(|s| s.slot_id).collect();
    let hold_rows: Vec<HoldRow> = holds::table
        .filter(holds::slot_id.eq_any(slot_ids))
        .filter(holds::is_active.eq(1))
        .load::<HoldRow>(conn)?;

    let mut available_slot_count: i64 = 0;
    for slot_row in &slot_rows {
        let slot_state: SlotState = slot_row.to_state()?;
        let slot_holds: Vec<HoldState> = hold_rows
            .iter()
            .filter(|h| h.slot_id == slot_row.slot_id)
            .map(HoldRow::to_state)
            .collect();

        if effective_available(&slot_state, &slot_holds, now, None) >= i64::from(quantity) {
            available_slot_count += 1;
        }
    }

    Ok(CanBookResult {
        can_book: available_slot_count > 0,
        reason: None,
        available_slot_count,
    })
}
}
