// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hold read-backs.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::HoldRow;
use crate::diesel_schema::holds;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a hold row by id, in whatever lifecycle state it is in.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `hold_id` - The hold to retrieve
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_hold(conn: &mut _, hold_id: i64) -> Result<Option<HoldRow>, PersistenceError> {
    holds::table
        .filter(holds::hold_id.eq(hold_id))
        .first::<HoldRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_hold: {e}")))
}
}
