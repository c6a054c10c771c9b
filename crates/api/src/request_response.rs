// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Every type here is a plain serde-serialisable shape; validation happens
//! in the handlers against the domain types, never in these structs.

use serde::{Deserialize, Serialize};

/// API request for listing availability.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListAvailabilityRequest {
    /// The event to list.
    pub event_id: i64,
    /// The caller's opaque session, if any. When present, the caller's own
    /// holds are excluded from the availability subtraction.
    pub session_id: Option<String>,
}

/// One slot in the availability listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AvailabilitySlot {
    /// The slot's identifier.
    pub slot_id: i64,
    /// The slot's start time (UTC).
    pub start_time: String,
    /// The slot's end time (UTC).
    pub end_time: String,
    /// The slot's immutable seat capacity.
    pub total_capacity: i32,
    /// Seats this caller could still reserve. May be non-positive when
    /// holds briefly overlap; callers that hide full slots filter on `> 0`.
    pub effective_available: i64,
    /// The slot's price as a decimal string.
    pub price: String,
}

/// API response for listing availability.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListAvailabilityResponse {
    /// The event that was listed.
    pub event_id: i64,
    /// The bookable slots, ordered by start time ascending.
    pub slots: Vec<AvailabilitySlot>,
}

/// API request for the booking pre-flight check.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CanBookRequest {
    /// The event to check.
    pub event_id: i64,
    /// Seats the caller wants. Defaults to 1 when absent.
    pub quantity: Option<i32>,
}

/// API response for the booking pre-flight check.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CanBookResponse {
    /// Whether at least one slot can take the requested quantity.
    pub can_book: bool,
    /// Why booking is impossible, when it is.
    pub reason: Option<String>,
    /// How many slots can take the requested quantity.
    pub available_slot_count: i64,
}

/// API request for creating a hold.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateHoldRequest {
    /// The slot to reserve seats on.
    pub slot_id: i64,
    /// The caller's opaque session (required, non-empty).
    pub session_id: String,
    /// Seats requested.
    pub quantity: i32,
    /// The authenticated user, if any.
    pub user_id: Option<i64>,
    /// Requested hold duration in minutes. Clamped to [1, 60]; defaults
    /// to 10 when absent.
    pub duration_min: Option<i64>,
}

/// API response for creating a hold.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateHoldResponse {
    /// The new hold's identifier.
    pub hold_id: i64,
    /// When the hold lapses (UTC). Informational: the server re-validates
    /// expiry on every write regardless of any countdown shown to the user.
    pub expires_at: String,
}

/// API request for verifying a hold.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyHoldRequest {
    /// The hold to verify.
    pub hold_id: i64,
    /// The caller's opaque session (required, non-empty).
    pub session_id: String,
}

/// API response for verifying a hold.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyHoldResponse {
    /// Whether the hold is active and unexpired.
    pub is_valid: bool,
    /// The stable reason when invalid ("not found", "released", "expired").
    pub reason: Option<String>,
    /// The hold's expiry, when the hold exists.
    pub expires_at: Option<String>,
}

/// API request for releasing a hold.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseHoldRequest {
    /// The hold to release.
    pub hold_id: i64,
    /// The caller's opaque session (required, non-empty).
    pub session_id: String,
}

/// API response for releasing a hold.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseHoldResponse {
    /// Whether the release transition was applied. `false` means the hold
    /// was already inactive or absent; callers must not treat that as fatal.
    pub released: bool,
}

/// API request for confirming a booking.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfirmBookingRequest {
    /// The hold to consume.
    pub hold_id: i64,
    /// The caller's opaque session (required, non-empty).
    pub session_id: String,
    /// The attendee's first name.
    pub first_name: String,
    /// The attendee's last name.
    pub last_name: String,
    /// The attendee's email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional free-form notes.
    pub notes: Option<String>,
}

/// API response for confirming a booking.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfirmBookingResponse {
    /// The new booking's identifier.
    pub booking_id: i64,
    /// The human-readable booking reference (8 uppercase alphanumerics).
    pub booking_reference: String,
}

/// API request for creating an event (administrative surface).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateEventRequest {
    /// The event's display name.
    pub name: String,
    /// The event's status ("draft", "active", "paused", "completed",
    /// "cancelled").
    pub status: String,
    /// The event's visibility ("public", "unlisted", "protected",
    /// "private").
    pub visibility: String,
    /// Weekday template for the slot generator, if any (e.g. "1,2,3").
    pub schedule_weekdays: Option<String>,
    /// Daily window open time for the generator, if any (e.g. "09:00").
    pub window_open_time: Option<String>,
    /// Daily window close time for the generator, if any (e.g. "17:00").
    pub window_close_time: Option<String>,
}

/// API response for creating an event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateEventResponse {
    /// The new event's identifier.
    pub event_id: i64,
}

/// API request for creating a time slot (administrative surface).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateTimeSlotRequest {
    /// The owning event.
    pub event_id: i64,
    /// The slot's start time (UTC, `YYYY-MM-DDTHH:MM:SSZ`).
    pub start_time: String,
    /// The slot's end time (UTC, `YYYY-MM-DDTHH:MM:SSZ`).
    pub end_time: String,
    /// The immutable seat capacity (positive).
    pub total_capacity: i32,
    /// The slot price as a decimal string (non-negative).
    pub price: String,
}

/// API response for creating a time slot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateTimeSlotResponse {
    /// The new slot's identifier.
    pub slot_id: i64,
}

/// API request for cancelling a time slot (administrative surface).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CancelTimeSlotRequest {
    /// The slot to cancel.
    pub slot_id: i64,
}

/// API response for cancelling a time slot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CancelTimeSlotResponse {
    /// The slot that was cancelled.
    pub slot_id: i64,
}
