// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod clock_tests;

use crate::{HoldState, SlotState};
use holdfast_domain::SlotStatus;

/// The observation time used by most tests.
pub const NOW: &str = "2026-08-02T10:00:00Z";

/// A future expiry relative to [`NOW`].
pub const FUTURE: &str = "2026-08-02T10:10:00Z";

/// A past expiry relative to [`NOW`].
pub const PAST: &str = "2026-08-02T09:50:00Z";

pub fn slot(total_capacity: i32, booked_count: i32) -> SlotState {
    SlotState {
        slot_id: 1,
        total_capacity,
        booked_count,
        status: SlotStatus::Available,
        start_time: String::from("2026-08-03T09:00:00Z"),
    }
}

pub fn hold(hold_id: i64, session_id: &str, quantity: i32) -> HoldState {
    HoldState {
        hold_id,
        session_id: session_id.to_string(),
        quantity,
        is_active: true,
        expires_at: String::from(FUTURE),
    }
}
