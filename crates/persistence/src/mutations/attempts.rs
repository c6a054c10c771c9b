// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Append-only booking-attempt persistence.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use holdfast_audit::BookingAttempt;

use crate::diesel_schema::booking_attempts;
use crate::error::PersistenceError;

backend_fn! {
/// Persists a booking-attempt record.
///
/// Attempt rows are append-only and never updated or deleted. The confirm
/// path writes its own success/failure rows directly; this entry point
/// exists for outer layers that record `abandoned` attempts.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `attempt` - The attempt record to persist
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn record_attempt(
    conn: &mut _,
    attempt: &BookingAttempt,
) -> Result<(), PersistenceError> {
    diesel::insert_into(booking_attempts::table)
        .values((
            booking_attempts::event_id.eq(attempt.event_id),
            booking_attempts::slot_id.eq(attempt.slot_id),
            booking_attempts::user_id.eq(attempt.user_id),
            booking_attempts::email.eq(&attempt.email),
            booking_attempts::status.eq(attempt.status.as_str()),
            booking_attempts::failure_reason.eq(attempt.failure_reason.as_deref()),
            booking_attempts::attempted_at.eq(&attempt.attempted_at),
        ))
        .execute(conn)?;

    debug!(
        slot_id = attempt.slot_id,
        status = %attempt.status,
        "Recorded booking attempt"
    );

    Ok(())
}
}
