// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking-attempt records for the Holdfast slot reservation system.
//!
//! Every call to confirm a booking produces exactly one attempt record,
//! successful or not. Attempt records are append-only observability data:
//! they are the durable trail of racing commits and are never consulted by
//! the reservation logic itself.

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

/// The outcome of a booking attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttemptStatus {
    /// The attempt produced a confirmed booking.
    Success,
    /// The attempt was rejected (invalid hold, capacity guard, bad input).
    Failed,
    /// The caller walked away before confirming (recorded by outer layers).
    Abandoned,
}

impl AttemptStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Abandoned => "abandoned",
        }
    }
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable record of one booking-confirmation attempt.
///
/// Attempt records capture:
/// - Which slot and event were targeted (`event_id`, `slot_id`)
/// - Who attempted, when known (`user_id`, `email`)
/// - The outcome (`status`) and, for failures, a short reason
/// - When the attempt happened (`attempted_at`, fixed-width UTC text)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingAttempt {
    /// The event the attempt targeted.
    pub event_id: i64,
    /// The slot the attempt targeted.
    pub slot_id: i64,
    /// The authenticated user, if any.
    pub user_id: Option<i64>,
    /// The attendee email supplied with the attempt.
    pub email: String,
    /// The outcome of the attempt.
    pub status: AttemptStatus,
    /// A short machine-readable reason, present for failures.
    pub failure_reason: Option<String>,
    /// When the attempt happened (fixed-width UTC text).
    pub attempted_at: String,
}

impl BookingAttempt {
    /// Creates a successful attempt record.
    ///
    /// # Arguments
    ///
    /// * `event_id` - The event the attempt targeted
    /// * `slot_id` - The slot the attempt targeted
    /// * `user_id` - The authenticated user, if any
    /// * `email` - The attendee email
    /// * `attempted_at` - When the attempt happened
    #[must_use]
    pub const fn success(
        event_id: i64,
        slot_id: i64,
        user_id: Option<i64>,
        email: String,
        attempted_at: String,
    ) -> Self {
        Self {
            event_id,
            slot_id,
            user_id,
            email,
            status: AttemptStatus::Success,
            failure_reason: None,
            attempted_at,
        }
    }

    /// Creates a failed attempt record.
    ///
    /// # Arguments
    ///
    /// * `event_id` - The event the attempt targeted
    /// * `slot_id` - The slot the attempt targeted
    /// * `user_id` - The authenticated user, if any
    /// * `email` - The attendee email
    /// * `failure_reason` - A short reason for the failure
    /// * `attempted_at` - When the attempt happened
    #[must_use]
    pub const fn failure(
        event_id: i64,
        slot_id: i64,
        user_id: Option<i64>,
        email: String,
        failure_reason: String,
        attempted_at: String,
    ) -> Self {
        Self {
            event_id,
            slot_id,
            user_id,
            email,
            status: AttemptStatus::Failed,
            failure_reason: Some(failure_reason),
            attempted_at,
        }
    }
}
