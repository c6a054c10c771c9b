// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Holdfast slot reservation system.
//!
//! This crate defines the callable surface of the reservation core: the
//! request/response types, the stable error taxonomy callers branch on, and
//! the handlers that validate input, drive the persistence layer, and
//! translate every lower-layer error explicitly. Transport framing (HTTP,
//! sessions, cookies) lives above this crate; handlers take plain requests
//! and an exclusive reference to the persistence adapter.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

// Re-export public types from error module
pub use error::{ApiError, translate_domain_error, translate_persistence_error};

// Re-export public types from request_response module
pub use request_response::{
    AvailabilitySlot, CanBookRequest, CanBookResponse, CancelTimeSlotRequest,
    CancelTimeSlotResponse, ConfirmBookingRequest, ConfirmBookingResponse, CreateEventRequest,
    CreateEventResponse, CreateHoldRequest, CreateHoldResponse, CreateTimeSlotRequest,
    CreateTimeSlotResponse, ListAvailabilityRequest, ListAvailabilityResponse,
    ReleaseHoldRequest, ReleaseHoldResponse, VerifyHoldRequest, VerifyHoldResponse,
};

// Re-export public functions from handlers module
pub use handlers::{
    can_book, cancel_time_slot, confirm_booking, create_event, create_hold, create_time_slot,
    list_availability, release_hold, verify_hold,
};
