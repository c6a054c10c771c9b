// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and operation results exposed by the persistence layer.
//!
//! Row structs mirror the table column order exactly (Diesel `Queryable`
//! matches by position). Result structs are what the adapter hands back to
//! the API layer.

use diesel::prelude::*;
use holdfast::{HoldState, SlotState};
use holdfast_domain::SlotStatus;
use std::str::FromStr;

use crate::error::PersistenceError;

/// One row of the `events` table.
#[derive(Debug, Clone, Queryable)]
pub struct EventRow {
    pub event_id: i64,
    pub name: String,
    pub status: String,
    pub visibility: String,
    pub schedule_weekdays: Option<String>,
    pub window_open_time: Option<String>,
    pub window_close_time: Option<String>,
    pub created_at: String,
}

/// One row of the `time_slots` table.
#[derive(Debug, Clone, Queryable)]
pub struct SlotRow {
    pub slot_id: i64,
    pub event_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub total_capacity: i32,
    pub booked_count: i32,
    pub status: String,
    pub price: String,
    pub created_at: String,
}

impl SlotRow {
    /// Converts this row into the core's slot snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status string does not parse.
    pub fn to_state(&self) -> Result<SlotState, PersistenceError> {
        let status: SlotStatus = SlotStatus::from_str(&self.status)?;
        Ok(SlotState {
            slot_id: self.slot_id,
            total_capacity: self.total_capacity,
            booked_count: self.booked_count,
            status,
            start_time: self.start_time.clone(),
        })
    }
}

/// One row of the `holds` table.
#[derive(Debug, Clone, Queryable)]
pub struct HoldRow {
    pub hold_id: i64,
    pub slot_id: i64,
    pub session_id: String,
    pub user_id: Option<i64>,
    pub quantity: i32,
    pub created_at: String,
    pub expires_at: String,
    pub is_active: i32,
    pub released_at: Option<String>,
}

impl HoldRow {
    /// Converts this row into the core's hold snapshot.
    #[must_use]
    pub fn to_state(&self) -> HoldState {
        HoldState {
            hold_id: self.hold_id,
            session_id: self.session_id.clone(),
            quantity: self.quantity,
            is_active: self.is_active != 0,
            expires_at: self.expires_at.clone(),
        }
    }
}

/// One row of the `bookings` table.
#[derive(Debug, Clone, Queryable)]
pub struct BookingRow {
    pub booking_id: i64,
    pub event_id: i64,
    pub slot_id: i64,
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub booking_reference: String,
    pub status: String,
    pub slot_date: String,
    pub slot_time: String,
    pub confirmed_at: String,
    pub created_at: String,
}

/// One row of the `booking_attempts` table.
#[derive(Debug, Clone, Queryable)]
pub struct AttemptRow {
    pub attempt_id: i64,
    pub event_id: i64,
    pub slot_id: i64,
    pub user_id: Option<i64>,
    pub email: String,
    pub status: String,
    pub failure_reason: Option<String>,
    pub attempted_at: String,
}

/// One row of the availability listing returned by `list_availability`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRow {
    /// The slot's identifier.
    pub slot_id: i64,
    /// The slot's start time (fixed-width UTC text).
    pub start_time: String,
    /// The slot's end time (fixed-width UTC text).
    pub end_time: String,
    /// The slot's immutable seat capacity.
    pub total_capacity: i32,
    /// Seats this caller could still reserve. May be non-positive when holds
    /// briefly overlap; callers that hide full slots filter on `> 0`.
    pub effective_available: i64,
    /// The slot's price as a decimal string.
    pub price: String,
}

/// The result of a `can_book` pre-flight check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanBookResult {
    /// Whether at least one slot can take the requested quantity.
    pub can_book: bool,
    /// Why booking is impossible, when it is.
    pub reason: Option<String>,
    /// How many slots can take the requested quantity.
    pub available_slot_count: i64,
}

impl CanBookResult {
    /// Builds the refusal shape `(false, reason, 0)`.
    #[must_use]
    pub fn refused(reason: &str) -> Self {
        Self {
            can_book: false,
            reason: Some(reason.to_string()),
            available_slot_count: 0,
        }
    }
}

/// The result of a successful `create_hold`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldCreated {
    /// The new hold's identifier.
    pub hold_id: i64,
    /// When the hold lapses (fixed-width UTC text).
    pub expires_at: String,
}

/// The result of a `verify_hold` observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldVerification {
    /// Whether the hold is active and unexpired.
    pub is_valid: bool,
    /// The stable reason when invalid ("not found", "released", "expired").
    pub reason: Option<String>,
    /// The hold's expiry, when the row exists.
    pub expires_at: Option<String>,
}

/// The result of a successful `confirm_booking`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmed {
    /// The new booking's identifier.
    pub booking_id: i64,
    /// The human-readable booking reference.
    pub booking_reference: String,
}
