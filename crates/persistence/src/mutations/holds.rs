// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hold mutations: the reservation side of the two-phase protocol.
//!
//! A hold's lifecycle is `created → (released | expired | consumed)`; all
//! three ends are terminal and leave the row in place for audit. Every
//! state transition here sets `is_active = 0` and stamps `released_at`.
//! Rows are never deleted and never re-activated.

use diesel::prelude::*;
use diesel::{Connection, MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use holdfast::{HoldState, HoldVerdict, SlotState, check_bookable, effective_available,
    verify_hold_state};
use holdfast_domain::{EventStatus, Visibility};
use std::str::FromStr;

use crate::backend::PersistenceBackend;
use crate::data_models::{EventRow, HoldCreated, HoldRow, HoldVerification, SlotRow};
use crate::diesel_schema::{events, holds, time_slots};
use crate::error::PersistenceError;

backend_fn! {
/// Creates a hold on a slot inside one serialised transaction.
///
/// Protocol:
/// 1. Deactivate this slot's already-expired holds (cheap, same transaction).
/// 2. Load the slot and its owning event; refuse unbookable states.
/// 3. Compute effective availability with the caller's own holds excluded.
/// 4. Refuse with the observed availability if the request does not fit.
/// 5. Deactivate any prior active hold for `(slot_id, session_id)`.
/// 6. Insert the replacement hold stamped with `expires_at`.
///
/// Two concurrent callers racing for the last seat both reach step 3; the
/// transaction boundary guarantees one of them observes the other's
/// committed row and fails the guard.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot_id` - The slot to reserve seats on
/// * `session_id` - The caller's opaque session (validated non-empty upstream)
/// * `quantity` - Seats requested (validated positive upstream)
/// * `user_id` - The authenticated user, if any
/// * `now` - The operation's captured "now" (fixed-width UTC text)
/// * `expires_at` - The precomputed expiry timestamp
///
/// # Errors
///
/// Returns `SlotNotFound`, `SlotUnavailable`, `CapacityExceeded` (with the
/// observed availability), or a storage error.
pub fn create_hold(
    conn: &mut _,
    slot_id: i64,
    session_id: &str,
    quantity: i32,
    user_id: Option<i64>,
    now: &str,
    expires_at: &str,
) -> Result<HoldCreated, PersistenceError> {
    conn.transaction(|conn| {
        // Scoped sweep. Correctness does not depend on it: every read below
        // still filters on expiry.
        diesel::update(holds::table)
            .filter(holds::slot_id.eq(slot_id))
            .filter(holds::is_active.eq(1))
            .filter(holds::expires_at.le(now))
            .set((holds::is_active.eq(0), holds::released_at.eq(now)))
            .execute(conn)?;

        let slot_row: SlotRow = time_slots::table
            .filter(time_slots::slot_id.eq(slot_id))
            .first::<SlotRow>(conn)
            .optional()?
            .ok_or(PersistenceError::SlotNotFound { slot_id })?;

        let event_row: EventRow = events::table
            .filter(events::event_id.eq(slot_row.event_id))
            .first::<EventRow>(conn)
            .optional()?
            .ok_or(PersistenceError::EventNotFound {
                event_id: slot_row.event_id,
            })?;

        let event_status: EventStatus = EventStatus::from_str(&event_row.status)?;
        let visibility: Visibility = Visibility::from_str(&event_row.visibility)?;
        let slot_state: SlotState = slot_row.to_state()?;

        check_bookable(event_status, visibility, &slot_state, now).map_err(|reason| {
            PersistenceError::SlotUnavailable {
                slot_id,
                reason: reason.to_string(),
            }
        })?;

        let hold_rows: Vec<HoldRow> = holds::table
            .filter(holds::slot_id.eq(slot_id))
            .filter(holds::is_active.eq(1))
            .load::<HoldRow>(conn)?;
        let hold_states: Vec<HoldState> = hold_rows.iter().map(HoldRow::to_state).collect();

        let available: i64 =
            effective_available(&slot_state, &hold_states, now, Some(session_id));
        if available < i64::from(quantity) {
            return Err(PersistenceError::CapacityExceeded { slot_id, available });
        }

        // At most one active hold per (slot, session): the prior one, if
        // any, is superseded rather than stacked.
        diesel::update(holds::table)
            .filter(holds::slot_id.eq(slot_id))
            .filter(holds::session_id.eq(session_id))
            .filter(holds::is_active.eq(1))
            .set((holds::is_active.eq(0), holds::released_at.eq(now)))
            .execute(conn)?;

        diesel::insert_into(holds::table)
            .values((
                holds::slot_id.eq(slot_id),
                holds::session_id.eq(session_id),
                holds::user_id.eq(user_id),
                holds::quantity.eq(quantity),
                holds::created_at.eq(now),
                holds::expires_at.eq(expires_at),
                holds::is_active.eq(1),
            ))
            .execute(conn)?;

        let hold_id: i64 = conn.get_last_insert_rowid()?;

        debug!(hold_id, slot_id, quantity, "Created hold");

        Ok(HoldCreated {
            hold_id,
            expires_at: expires_at.to_string(),
        })
    })
}
}

backend_fn! {
/// Observes a hold's validity, healing an expired row in passing.
///
/// The self-healing transition (`is_active := 0, released_at := now`) is
/// idempotent and filtered on `is_active = 1`, so concurrent observers of
/// the same expired hold all converge on the same final state.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `hold_id` - The hold to verify
/// * `now` - The operation's captured "now" (fixed-width UTC text)
///
/// # Errors
///
/// Returns an error only on storage failure; invalid holds are reported in
/// the verification result, not as errors.
pub fn verify_hold(
    conn: &mut _,
    hold_id: i64,
    now: &str,
) -> Result<HoldVerification, PersistenceError> {
    conn.transaction(|conn| {
        let hold_row: Option<HoldRow> = holds::table
            .filter(holds::hold_id.eq(hold_id))
            .first::<HoldRow>(conn)
            .optional()?;

        let hold_state: Option<HoldState> = hold_row.as_ref().map(HoldRow::to_state);
        let verdict: HoldVerdict = verify_hold_state(hold_state.as_ref(), now);

        if matches!(verdict, HoldVerdict::Expired { .. }) {
            diesel::update(holds::table)
                .filter(holds::hold_id.eq(hold_id))
                .filter(holds::is_active.eq(1))
                .set((holds::is_active.eq(0), holds::released_at.eq(now)))
                .execute(conn)?;
            debug!(hold_id, "Healed expired hold during verification");
        }

        Ok(match verdict {
            HoldVerdict::Valid { expires_at } => HoldVerification {
                is_valid: true,
                reason: None,
                expires_at: Some(expires_at),
            },
            HoldVerdict::NotFound => HoldVerification {
                is_valid: false,
                reason: Some(String::from("not found")),
                expires_at: None,
            },
            HoldVerdict::Released { expires_at } => HoldVerification {
                is_valid: false,
                reason: Some(String::from("released")),
                expires_at: Some(expires_at),
            },
            HoldVerdict::Expired { expires_at } => HoldVerification {
                is_valid: false,
                reason: Some(String::from("expired")),
                expires_at: Some(expires_at),
            },
        })
    })
}
}

backend_fn! {
/// Releases a hold if it is currently active.
///
/// Best-effort and idempotent: a second call (or a call racing the expiry
/// sweep) returns `false` and changes nothing. Callers must not treat a
/// `false` return as fatal; the sweep reaps whatever this misses.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `hold_id` - The hold to release
/// * `now` - The operation's captured "now" (fixed-width UTC text)
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn release_hold(conn: &mut _, hold_id: i64, now: &str) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::update(holds::table)
        .filter(holds::hold_id.eq(hold_id))
        .filter(holds::is_active.eq(1))
        .set((holds::is_active.eq(0), holds::released_at.eq(now)))
        .execute(conn)?;

    debug!(hold_id, released = rows_affected > 0, "Released hold");

    Ok(rows_affected > 0)
}
}

backend_fn! {
/// Deactivates every active hold whose expiry has passed.
///
/// Idempotent and safe to run concurrently with itself. This sweep only
/// tidies rows; every capacity decision independently filters
/// `is_active AND expires_at > now`, so nothing depends on it running.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `now` - The sweep's captured "now" (fixed-width UTC text)
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn release_expired_holds(conn: &mut _, now: &str) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::update(holds::table)
        .filter(holds::is_active.eq(1))
        .filter(holds::expires_at.le(now))
        .set((holds::is_active.eq(0), holds::released_at.eq(now)))
        .execute(conn)?;

    if rows_affected > 0 {
        info!("Released {} expired hold(s)", rows_affected);
    }

    Ok(rows_affected)
}
}
