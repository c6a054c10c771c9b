// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking finaliser: converting a valid hold into a confirmed booking.
//!
//! The whole conversion runs inside one transaction over the hold's slot:
//! revalidate the hold, re-run the capacity guard with the converting hold
//! excluded, mint a unique booking reference, insert the booking, bump the
//! slot counter (flipping `full` when the last seat goes), consume the hold,
//! and append the success attempt record. A failure anywhere rolls the whole
//! thing back; the failed attempt record is then written separately so it
//! survives the rollback.

use diesel::prelude::*;
use diesel::{Connection, MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use holdfast::{
    HoldState, HoldVerdict, SlotState, generate_booking_reference, residual_capacity, slot_date,
    slot_time, verify_hold_state,
};
use holdfast_audit::AttemptStatus;
use holdfast_domain::{Attendee, BookingStatus};

use crate::backend::PersistenceBackend;
use crate::data_models::{BookingConfirmed, HoldRow, SlotRow};
use crate::diesel_schema::{booking_attempts, bookings, holds, time_slots};
use crate::error::PersistenceError;

/// How many booking-reference candidates are tried before giving up.
///
/// The reference space holds ~2.8e12 values; repeated collisions at this
/// depth indicate something badly wrong, surfaced as a transient failure.
const MAX_REFERENCE_ATTEMPTS: usize = 5;

backend_fn! {
/// Converts a hold into a confirmed booking inside one transaction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `hold_id` - The hold to consume
/// * `attendee` - The validated attendee payload
/// * `now` - The operation's captured "now" (fixed-width UTC text)
///
/// # Errors
///
/// Returns `HoldInvalid` (missing, released, or expired hold),
/// `CapacityExceeded` (the residual guard fired), `Transient` (reference
/// space exhausted), or a storage error.
pub fn confirm_booking(
    conn: &mut _,
    hold_id: i64,
    attendee: &Attendee,
    now: &str,
) -> Result<BookingConfirmed, PersistenceError> {
    conn.transaction(|conn| {
        let hold_row: Option<HoldRow> = holds::table
            .filter(holds::hold_id.eq(hold_id))
            .first::<HoldRow>(conn)
            .optional()?;

        let Some(hold_row) = hold_row else {
            return Err(PersistenceError::HoldInvalid {
                hold_id,
                reason: String::from("not found"),
            });
        };

        let hold_state: HoldState = hold_row.to_state();
        let verdict: HoldVerdict = verify_hold_state(Some(&hold_state), now);
        if !verdict.is_valid() {
            return Err(PersistenceError::HoldInvalid {
                hold_id,
                reason: verdict.reason().unwrap_or("invalid").to_string(),
            });
        }

        let slot_row: SlotRow = time_slots::table
            .filter(time_slots::slot_id.eq(hold_row.slot_id))
            .first::<SlotRow>(conn)
            .optional()?
            .ok_or(PersistenceError::SlotNotFound {
                slot_id: hold_row.slot_id,
            })?;
        let slot_state: SlotState = slot_row.to_state()?;

        // The residual guard excludes this hold: its seats are about to be
        // converted, not double-counted. It fires when a race let two holds
        // briefly overlap, or when booked_count drifted via admin action.
        let active_holds: Vec<HoldRow> = holds::table
            .filter(holds::slot_id.eq(hold_row.slot_id))
            .filter(holds::is_active.eq(1))
            .load::<HoldRow>(conn)?;
        let hold_states: Vec<HoldState> = active_holds.iter().map(HoldRow::to_state).collect();

        let residual: i64 = residual_capacity(&slot_state, &hold_states, now, hold_id);
        if residual < i64::from(hold_row.quantity) {
            return Err(PersistenceError::CapacityExceeded {
                slot_id: hold_row.slot_id,
                available: residual,
            });
        }

        // Mint a reference: generate, check, retry. Expected to succeed on
        // the first iteration at realistic volumes.
        let mut rng = rand::thread_rng();
        let mut reference: Option<String> = None;
        for _ in 0..MAX_REFERENCE_ATTEMPTS {
            let candidate: String = generate_booking_reference(&mut rng);
            let collisions: i64 = bookings::table
                .filter(bookings::booking_reference.eq(&candidate))
                .count()
                .get_result(conn)?;
            if collisions == 0 {
                reference = Some(candidate);
                break;
            }
        }
        let reference: String = reference.ok_or_else(|| {
            PersistenceError::Transient(format!(
                "booking reference generation exhausted {MAX_REFERENCE_ATTEMPTS} attempts"
            ))
        })?;

        let date: String = slot_date(&slot_row.start_time)?;
        let time_of_day: String = slot_time(&slot_row.start_time)?;

        diesel::insert_into(bookings::table)
            .values((
                bookings::event_id.eq(slot_row.event_id),
                bookings::slot_id.eq(slot_row.slot_id),
                bookings::user_id.eq(hold_row.user_id),
                bookings::first_name.eq(attendee.first_name()),
                bookings::last_name.eq(attendee.last_name()),
                bookings::email.eq(attendee.email()),
                bookings::phone.eq(attendee.phone()),
                bookings::notes.eq(attendee.notes()),
                bookings::booking_reference.eq(&reference),
                bookings::status.eq(BookingStatus::Confirmed.as_str()),
                bookings::slot_date.eq(&date),
                bookings::slot_time.eq(&time_of_day),
                bookings::confirmed_at.eq(now),
                bookings::created_at.eq(now),
            ))
            .execute(conn)?;

        let booking_id: i64 = conn.get_last_insert_rowid()?;

        let new_booked: i32 = slot_row.booked_count + hold_row.quantity;
        if new_booked >= slot_row.total_capacity {
            diesel::update(time_slots::table)
                .filter(time_slots::slot_id.eq(slot_row.slot_id))
                .set((
                    time_slots::booked_count.eq(new_booked),
                    time_slots::status.eq("full"),
                ))
                .execute(conn)?;
        } else {
            diesel::update(time_slots::table)
                .filter(time_slots::slot_id.eq(slot_row.slot_id))
                .set(time_slots::booked_count.eq(new_booked))
                .execute(conn)?;
        }

        // Consume the hold. Terminal, like release and expiry.
        diesel::update(holds::table)
            .filter(holds::hold_id.eq(hold_id))
            .set((holds::is_active.eq(0), holds::released_at.eq(now)))
            .execute(conn)?;

        diesel::insert_into(booking_attempts::table)
            .values((
                booking_attempts::event_id.eq(slot_row.event_id),
                booking_attempts::slot_id.eq(slot_row.slot_id),
                booking_attempts::user_id.eq(hold_row.user_id),
                booking_attempts::email.eq(attendee.email()),
                booking_attempts::status.eq(AttemptStatus::Success.as_str()),
                booking_attempts::attempted_at.eq(now),
            ))
            .execute(conn)?;

        info!(
            booking_id,
            slot_id = slot_row.slot_id,
            quantity = hold_row.quantity,
            "Confirmed booking"
        );

        Ok(BookingConfirmed {
            booking_id,
            booking_reference: reference,
        })
    })
}
}

backend_fn! {
/// Records a failed confirmation attempt in its own small transaction.
///
/// Called after `confirm_booking` rolled back, so the failure trail is not
/// lost with the rollback. Returns `false` when the hold (and therefore the
/// targeted slot) cannot be identified; there is nothing useful to record
/// for a dangling hold id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `hold_id` - The hold the failed confirmation referenced
/// * `email` - The attendee email supplied with the attempt
/// * `failure_reason` - A short machine-readable reason
/// * `now` - The operation's captured "now" (fixed-width UTC text)
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn record_failed_confirm(
    conn: &mut _,
    hold_id: i64,
    email: &str,
    failure_reason: &str,
    now: &str,
) -> Result<bool, PersistenceError> {
    conn.transaction(|conn| {
        let hold_row: Option<HoldRow> = holds::table
            .filter(holds::hold_id.eq(hold_id))
            .first::<HoldRow>(conn)
            .optional()?;

        let Some(hold_row) = hold_row else {
            return Ok(false);
        };

        let slot_row: Option<SlotRow> = time_slots::table
            .filter(time_slots::slot_id.eq(hold_row.slot_id))
            .first::<SlotRow>(conn)
            .optional()?;

        let Some(slot_row) = slot_row else {
            return Ok(false);
        };

        diesel::insert_into(booking_attempts::table)
            .values((
                booking_attempts::event_id.eq(slot_row.event_id),
                booking_attempts::slot_id.eq(slot_row.slot_id),
                booking_attempts::user_id.eq(hold_row.user_id),
                booking_attempts::email.eq(email),
                booking_attempts::status.eq(AttemptStatus::Failed.as_str()),
                booking_attempts::failure_reason.eq(failure_reason),
                booking_attempts::attempted_at.eq(now),
            ))
            .execute(conn)?;

        debug!(hold_id, failure_reason, "Recorded failed booking attempt");

        Ok(true)
    })
}
}
