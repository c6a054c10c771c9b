// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure reservation logic for the Holdfast slot reservation system.
//!
//! This crate owns every decision the reservation core makes, expressed as
//! functions over plain snapshots of database rows: availability with
//! own-session exclusion, the capacity guard run at hold creation and again
//! at confirmation, hold validity verdicts, and booking-reference
//! generation. It performs no I/O; the persistence layer loads the rows,
//! asks this crate for a decision, and commits the outcome inside the same
//! transaction.
//!
//! Keeping the decisions pure means the oversell invariant can be tested
//! exhaustively without a database, and the persistence layer stays a thin
//! commit protocol around them.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

#[cfg(test)]
mod tests;

mod availability;
mod clock;
mod reference;

pub use availability::{
    HoldVerdict, SlotUnavailableReason, active_held_quantity, check_bookable, effective_available,
    residual_capacity, verify_hold_state,
};
pub use clock::{
    expiry_timestamp, format_timestamp, now_timestamp, now_utc, parse_timestamp, slot_date,
    slot_time,
};
pub use reference::{BOOKING_REFERENCE_LENGTH, generate_booking_reference, is_booking_reference};

use holdfast_domain::SlotStatus;

/// A snapshot of one time-slot row, as loaded inside a transaction.
///
/// `available_count` is derived, never stored:
/// `total_capacity - booked_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotState {
    /// The slot's identifier.
    pub slot_id: i64,
    /// The immutable seat capacity.
    pub total_capacity: i32,
    /// Seats consumed by confirmed bookings.
    pub booked_count: i32,
    /// The slot's status.
    pub status: SlotStatus,
    /// The slot's start time (fixed-width UTC text).
    pub start_time: String,
}

impl SlotState {
    /// Returns the number of seats not consumed by confirmed bookings.
    ///
    /// Active holds are not subtracted here; that is the availability
    /// calculation's job, which needs to know whose holds to exclude.
    #[must_use]
    pub fn available_count(&self) -> i64 {
        i64::from(self.total_capacity) - i64::from(self.booked_count)
    }
}

/// A snapshot of one hold row, as loaded inside a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldState {
    /// The hold's identifier.
    pub hold_id: i64,
    /// The session that owns the hold.
    pub session_id: String,
    /// Seats reserved by the hold.
    pub quantity: i32,
    /// Whether the hold has been released, consumed, or expired.
    pub is_active: bool,
    /// When the hold lapses (fixed-width UTC text).
    pub expires_at: String,
}

impl HoldState {
    /// Returns whether this hold still deducts from capacity at `now`.
    ///
    /// A hold counts only while it is active and unexpired. Expiry is
    /// evaluated here on every observation; the background sweep merely
    /// tidies rows and is never relied upon for correctness.
    #[must_use]
    pub fn is_live(&self, now: &str) -> bool {
        self.is_active && self.expires_at.as_str() > now
    }
}

/// Errors that can occur in the pure core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A stored timestamp could not be parsed.
    InvalidTimestamp {
        /// The value that failed to parse.
        value: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimestamp { value } => {
                write!(f, "Invalid timestamp: '{value}'")
            }
        }
    }
}

impl std::error::Error for CoreError {}
