// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for the reservation surface.
//!
//! Each handler validates its request against the domain types, drives the
//! persistence adapter, and translates every lower-layer error explicitly.
//! Handlers never cache capacity or hold state: the committed database is
//! the sole authority, and each call re-reads it.

use std::str::FromStr;
use tracing::{debug, info};

use holdfast_domain::{
    Attendee, EventStatus, HoldDuration, Price, Quantity, SessionId, Visibility,
};
use holdfast_persistence::{
    AvailabilityRow, BookingConfirmed, CanBookResult, HoldCreated, HoldVerification, Persistence,
};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AvailabilitySlot, CanBookRequest, CanBookResponse, CancelTimeSlotRequest,
    CancelTimeSlotResponse, ConfirmBookingRequest, ConfirmBookingResponse, CreateEventRequest,
    CreateEventResponse, CreateHoldRequest, CreateHoldResponse, CreateTimeSlotRequest,
    CreateTimeSlotResponse, ListAvailabilityRequest, ListAvailabilityResponse,
    ReleaseHoldRequest, ReleaseHoldResponse, VerifyHoldRequest, VerifyHoldResponse,
};

/// Validates a required session id.
fn require_session(session_id: &str) -> Result<SessionId, ApiError> {
    SessionId::new(session_id).map_err(translate_domain_error)
}

/// Lists the bookable slots of an event.
///
/// Accessible to unauthenticated callers; a session id, when supplied,
/// excludes that caller's own holds from the availability subtraction so a
/// refresh mid-booking does not show phantom unavailability.
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `request` - The listing request
///
/// # Errors
///
/// Returns `EventNotFound` if the event does not exist, `InvalidArgument`
/// for a present-but-empty session id, or a translated storage error.
pub fn list_availability(
    persistence: &mut Persistence,
    request: &ListAvailabilityRequest,
) -> Result<ListAvailabilityResponse, ApiError> {
    let session: Option<SessionId> = match request.session_id.as_deref() {
        Some(raw) => Some(require_session(raw)?),
        None => None,
    };

    let rows: Vec<AvailabilityRow> = persistence
        .list_availability(request.event_id, session.as_ref().map(SessionId::value))
        .map_err(translate_persistence_error)?;

    debug!(
        event_id = request.event_id,
        slots = rows.len(),
        "Listed availability"
    );

    Ok(ListAvailabilityResponse {
        event_id: request.event_id,
        slots: rows
            .into_iter()
            .map(|row| AvailabilitySlot {
                slot_id: row.slot_id,
                start_time: row.start_time,
                end_time: row.end_time,
                total_capacity: row.total_capacity,
                effective_available: row.effective_available,
                price: row.price,
            })
            .collect(),
    })
}

/// Pre-flight check: could anyone book `quantity` seats on this event?
///
/// Always returns a response tuple; an unbookable event is reported as
/// `can_book = false` with a reason, never as an error.
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `request` - The pre-flight request
///
/// # Errors
///
/// Returns `InvalidQuantity` for a non-positive quantity, or a translated
/// storage error.
pub fn can_book(
    persistence: &mut Persistence,
    request: &CanBookRequest,
) -> Result<CanBookResponse, ApiError> {
    let quantity: Quantity =
        Quantity::new(request.quantity.unwrap_or(1)).map_err(translate_domain_error)?;

    let result: CanBookResult = persistence
        .can_book(request.event_id, quantity)
        .map_err(translate_persistence_error)?;

    Ok(CanBookResponse {
        can_book: result.can_book,
        reason: result.reason,
        available_slot_count: result.available_slot_count,
    })
}

/// Creates a hold on a slot for the caller's session.
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `request` - The hold request
///
/// # Errors
///
/// Returns `InvalidQuantity`, `InvalidArgument` (empty session),
/// `SlotNotFound`, `SlotUnavailable`, `CapacityExceeded`, or
/// `TransientStorage`.
pub fn create_hold(
    persistence: &mut Persistence,
    request: &CreateHoldRequest,
) -> Result<CreateHoldResponse, ApiError> {
    let session: SessionId = require_session(&request.session_id)?;
    let quantity: Quantity = Quantity::new(request.quantity).map_err(translate_domain_error)?;
    let duration: HoldDuration = HoldDuration::from_request(request.duration_min);

    let created: HoldCreated = persistence
        .create_hold(
            request.slot_id,
            &session,
            quantity,
            request.user_id,
            duration,
        )
        .map_err(translate_persistence_error)?;

    info!(
        hold_id = created.hold_id,
        slot_id = request.slot_id,
        quantity = request.quantity,
        "Hold created"
    );

    Ok(CreateHoldResponse {
        hold_id: created.hold_id,
        expires_at: created.expires_at,
    })
}

/// Observes a hold's validity.
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `request` - The verification request
///
/// # Errors
///
/// Returns `InvalidArgument` for an empty session id, or a translated
/// storage error. Invalid holds are reported in the response, not as
/// errors.
pub fn verify_hold(
    persistence: &mut Persistence,
    request: &VerifyHoldRequest,
) -> Result<VerifyHoldResponse, ApiError> {
    require_session(&request.session_id)?;

    let verification: HoldVerification = persistence
        .verify_hold(request.hold_id)
        .map_err(translate_persistence_error)?;

    Ok(VerifyHoldResponse {
        is_valid: verification.is_valid,
        reason: verification.reason,
        expires_at: verification.expires_at,
    })
}

/// Releases a hold.
///
/// Best-effort: a `released = false` response means the hold was already
/// inactive or absent, which callers (including session-close paths) must
/// not treat as fatal.
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `request` - The release request
///
/// # Errors
///
/// Returns `InvalidArgument` for an empty session id, or a translated
/// storage error.
pub fn release_hold(
    persistence: &mut Persistence,
    request: &ReleaseHoldRequest,
) -> Result<ReleaseHoldResponse, ApiError> {
    require_session(&request.session_id)?;

    let released: bool = persistence
        .release_hold(request.hold_id)
        .map_err(translate_persistence_error)?;

    debug!(hold_id = request.hold_id, released, "Release hold");

    Ok(ReleaseHoldResponse { released })
}

/// Converts a valid hold into a confirmed booking.
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `request` - The confirmation request with attendee details
///
/// # Errors
///
/// Returns `InvalidArgument` (empty session), `InvalidAttendee`,
/// `HoldInvalid`, `CapacityExceeded`, or `TransientStorage`.
pub fn confirm_booking(
    persistence: &mut Persistence,
    request: &ConfirmBookingRequest,
) -> Result<ConfirmBookingResponse, ApiError> {
    require_session(&request.session_id)?;

    let attendee: Attendee = Attendee::new(
        &request.first_name,
        &request.last_name,
        &request.email,
        request.phone.as_deref(),
        request.notes.as_deref(),
    )
    .map_err(translate_domain_error)?;

    let confirmed: BookingConfirmed = persistence
        .confirm_booking(request.hold_id, &attendee)
        .map_err(translate_persistence_error)?;

    info!(
        booking_id = confirmed.booking_id,
        hold_id = request.hold_id,
        "Booking confirmed"
    );

    Ok(ConfirmBookingResponse {
        booking_id: confirmed.booking_id,
        booking_reference: confirmed.booking_reference,
    })
}

/// Creates an event (administrative surface).
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `request` - The event definition
///
/// # Errors
///
/// Returns `InvalidArgument` for an unknown status/visibility or an empty
/// name, or a translated storage error.
pub fn create_event(
    persistence: &mut Persistence,
    request: &CreateEventRequest,
) -> Result<CreateEventResponse, ApiError> {
    let name: &str = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidArgument {
            field: String::from("name"),
            message: String::from("must be non-empty"),
        });
    }

    let status: EventStatus =
        EventStatus::from_str(&request.status).map_err(translate_domain_error)?;
    let visibility: Visibility =
        Visibility::from_str(&request.visibility).map_err(translate_domain_error)?;

    let event_id: i64 = persistence
        .create_event(
            name,
            status,
            visibility,
            request.schedule_weekdays.as_deref(),
            request.window_open_time.as_deref(),
            request.window_close_time.as_deref(),
        )
        .map_err(translate_persistence_error)?;

    Ok(CreateEventResponse { event_id })
}

/// Creates a time slot under an event (administrative surface).
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `request` - The slot definition
///
/// # Errors
///
/// Returns `InvalidArgument` for malformed timestamps, a non-positive
/// capacity, a negative price, or end-before-start; `EventNotFound` for a
/// missing event; or a translated storage error.
pub fn create_time_slot(
    persistence: &mut Persistence,
    request: &CreateTimeSlotRequest,
) -> Result<CreateTimeSlotResponse, ApiError> {
    holdfast::parse_timestamp(&request.start_time).map_err(|_| ApiError::InvalidArgument {
        field: String::from("start_time"),
        message: format!("'{}' is not a UTC timestamp", request.start_time),
    })?;
    holdfast::parse_timestamp(&request.end_time).map_err(|_| ApiError::InvalidArgument {
        field: String::from("end_time"),
        message: format!("'{}' is not a UTC timestamp", request.end_time),
    })?;
    if request.end_time.as_str() <= request.start_time.as_str() {
        return Err(ApiError::InvalidArgument {
            field: String::from("end_time"),
            message: String::from("must be after start_time"),
        });
    }

    let capacity: Quantity =
        Quantity::new(request.total_capacity).map_err(|_| ApiError::InvalidArgument {
            field: String::from("total_capacity"),
            message: format!(
                "{} is not a positive capacity",
                request.total_capacity
            ),
        })?;
    let price: Price = Price::from_str(&request.price).map_err(translate_domain_error)?;

    let slot_id: i64 = persistence
        .create_time_slot(
            request.event_id,
            &request.start_time,
            &request.end_time,
            capacity,
            &price,
        )
        .map_err(translate_persistence_error)?;

    Ok(CreateTimeSlotResponse { slot_id })
}

/// Cancels a time slot (administrative surface).
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `request` - The cancellation request
///
/// # Errors
///
/// Returns `SlotNotFound` for a missing slot, or a translated storage
/// error.
pub fn cancel_time_slot(
    persistence: &mut Persistence,
    request: &CancelTimeSlotRequest,
) -> Result<CancelTimeSlotResponse, ApiError> {
    persistence
        .cancel_time_slot(request.slot_id)
        .map_err(translate_persistence_error)?;

    info!(slot_id = request.slot_id, "Time slot cancelled");

    Ok(CancelTimeSlotResponse {
        slot_id: request.slot_id,
    })
}
