// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! `ApiError` is the contract callers program against: a stable kind tag
//! plus a human-readable message. The kinds are deliberately coarse. Each
//! one maps to a distinct client recovery (fix the request, re-list
//! availability, obtain a new hold, retry once, give up).

use holdfast_domain::DomainError;
use holdfast_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API
/// contract. Callers branch on [`ApiError::kind`], which is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A request field is malformed. Never retry unchanged.
    InvalidArgument {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The requested seat quantity is not a positive integer.
    InvalidQuantity {
        /// The quantity that was rejected.
        quantity: i32,
    },
    /// An attendee field failed validation.
    InvalidAttendee {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The referenced event does not exist.
    EventNotFound {
        /// The event that was requested.
        event_id: i64,
    },
    /// The referenced time slot does not exist.
    SlotNotFound {
        /// The slot that was requested.
        slot_id: i64,
    },
    /// The slot exists but is not in a bookable state.
    SlotUnavailable {
        /// The slot that refused.
        slot_id: i64,
        /// Why the slot refused.
        reason: String,
    },
    /// The referenced hold is missing, released, or expired.
    /// Recovery: obtain a new hold.
    HoldInvalid {
        /// The stable reason ("not found", "released", "expired").
        reason: String,
    },
    /// The capacity guard failed.
    /// Recovery: re-list availability; the selected slot may now be full.
    CapacityExceeded {
        /// The availability observed inside the failing transaction.
        available: i64,
    },
    /// A transient storage failure. Recovery: retry the same request once,
    /// then back off.
    TransientStorage {
        /// A description of the failure.
        message: String,
    },
    /// An unexpected internal error. Recovery: report and stop.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the stable kind tag for this error.
    ///
    /// Clients branch on this string; it never changes for a given variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::InvalidQuantity { .. } => "invalid_quantity",
            Self::InvalidAttendee { .. } => "invalid_attendee",
            Self::EventNotFound { .. } => "event_not_found",
            Self::SlotNotFound { .. } => "slot_not_found",
            Self::SlotUnavailable { .. } => "slot_unavailable",
            Self::HoldInvalid { .. } => "hold_invalid",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::TransientStorage { .. } => "transient_storage",
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidQuantity { quantity } => {
                write!(f, "Invalid quantity: {quantity}. Must be a positive integer")
            }
            Self::InvalidAttendee { field, message } => {
                write!(f, "Invalid attendee field '{field}': {message}")
            }
            Self::EventNotFound { event_id } => write!(f, "Event {event_id} not found"),
            Self::SlotNotFound { slot_id } => write!(f, "Time slot {slot_id} not found"),
            Self::SlotUnavailable { slot_id, reason } => {
                write!(f, "Time slot {slot_id} is unavailable: {reason}")
            }
            Self::HoldInvalid { reason } => write!(f, "Hold is invalid: {reason}"),
            Self::CapacityExceeded { available } => {
                write!(f, "Capacity exceeded: {available} seat(s) available")
            }
            Self::TransientStorage { message } => {
                write!(f, "Transient storage failure: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidQuantity { quantity } => ApiError::InvalidQuantity { quantity },
        DomainError::InvalidSessionId(msg) => ApiError::InvalidArgument {
            field: String::from("session_id"),
            message: msg,
        },
        DomainError::InvalidAttendee { field, message } => {
            ApiError::InvalidAttendee { field, message }
        }
        DomainError::InvalidPrice(msg) => ApiError::InvalidArgument {
            field: String::from("price"),
            message: msg,
        },
        DomainError::InvalidEventStatus(value) => ApiError::InvalidArgument {
            field: String::from("status"),
            message: format!("unknown event status '{value}'"),
        },
        DomainError::InvalidVisibility(value) => ApiError::InvalidArgument {
            field: String::from("visibility"),
            message: format!("unknown visibility '{value}'"),
        },
        // Slot and booking status strings never arrive from callers; a parse
        // failure here means the stored data is corrupt.
        DomainError::InvalidSlotStatus(value) | DomainError::InvalidBookingStatus(value) => {
            ApiError::Internal {
                message: format!("corrupt stored status '{value}'"),
            }
        }
    }
}

/// Translates a persistence error into an API error.
///
/// This translation is explicit and ensures persistence errors are not
/// leaked directly.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EventNotFound { event_id } => ApiError::EventNotFound { event_id },
        PersistenceError::SlotNotFound { slot_id } => ApiError::SlotNotFound { slot_id },
        PersistenceError::SlotUnavailable { slot_id, reason } => {
            ApiError::SlotUnavailable { slot_id, reason }
        }
        PersistenceError::CapacityExceeded { available, .. } => {
            ApiError::CapacityExceeded { available }
        }
        PersistenceError::HoldInvalid { reason, .. } => ApiError::HoldInvalid { reason },
        PersistenceError::Transient(message) | PersistenceError::Conflict(message) => {
            ApiError::TransientStorage { message }
        }
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
