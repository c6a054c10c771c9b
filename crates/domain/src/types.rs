// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the lifecycle status of an event.
///
/// Only `Active` events are bookable; every other status refuses new holds
/// and bookings while leaving existing bookings untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventStatus {
    /// Initial state after creation. Not visible to bookers.
    #[default]
    Draft,
    /// Open for booking.
    Active,
    /// Temporarily closed for booking.
    Paused,
    /// All slots have passed.
    Completed,
    /// Withdrawn by the organiser.
    Cancelled,
}

impl EventStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether the event accepts new holds and bookings.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidEventStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents who can discover and book an event.
///
/// `Protected` is accepted as a bookable visibility and treated identically
/// to `Unlisted` for authorisation purposes; it carries no further semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Visibility {
    /// Listed and bookable by anyone.
    #[default]
    Public,
    /// Bookable by anyone who has the link; not listed.
    Unlisted,
    /// Bookable by anyone who has the link; not listed.
    Protected,
    /// Not bookable through the public surface.
    Private,
}

impl Visibility {
    /// Converts this visibility to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Unlisted => "unlisted",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }

    /// Returns whether anonymous callers may book events with this visibility.
    #[must_use]
    pub const fn is_bookable(&self) -> bool {
        matches!(self, Self::Public | Self::Unlisted | Self::Protected)
    }
}

impl FromStr for Visibility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "unlisted" => Ok(Self::Unlisted),
            "protected" => Ok(Self::Protected),
            "private" => Ok(Self::Private),
            _ => Err(DomainError::InvalidVisibility(s.to_string())),
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the status of a time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SlotStatus {
    /// Open for reservation.
    #[default]
    Available,
    /// Every seat is booked. Must hold exactly when `booked_count` reaches
    /// `total_capacity`.
    Full,
    /// Withdrawn; never bookable again.
    Cancelled,
}

impl SlotStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Full => "full",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for SlotStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "full" => Ok(Self::Full),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidSlotStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the status of a booking.
///
/// Bookings are created in `Confirmed` state; cancellation paths live outside
/// the reservation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// The booking is live.
    #[default]
    Confirmed,
    /// The booking was cancelled after confirmation.
    Cancelled,
}

impl BookingStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidBookingStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An opaque browser-session identifier supplied by the outer layer.
///
/// The session is the unit of "same caller" for hold deduplication and
/// own-hold exclusion. It is deliberately not the user id: anonymous callers
/// are supported, and an authenticated user on two devices gets two
/// independent reservation contexts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId {
    /// The opaque session value.
    value: String,
}

impl SessionId {
    /// Creates a new `SessionId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The opaque session string from the outer layer
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty after trimming.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidSessionId(String::from(
                "session id must be non-empty",
            )));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the session value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A validated seat quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quantity {
    /// The number of seats requested.
    value: i32,
}

impl Quantity {
    /// Creates a new `Quantity`.
    ///
    /// # Arguments
    ///
    /// * `value` - The number of seats requested
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero or negative.
    pub const fn new(value: i32) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidQuantity { quantity: value });
        }
        Ok(Self { value })
    }

    /// Returns the quantity value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }
}

/// A hold duration in minutes, clamped to the permitted range.
///
/// Requests may ask for any duration; the effective value is bounded to
/// `[MIN_MINUTES, MAX_MINUTES]` with `DEFAULT_MINUTES` when absent. The
/// clamp is silent: the caller's countdown is a hint, never an authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoldDuration {
    /// The effective duration in minutes.
    minutes: i64,
}

impl HoldDuration {
    /// The default hold duration in minutes.
    pub const DEFAULT_MINUTES: i64 = 10;
    /// The shortest permitted hold duration in minutes.
    pub const MIN_MINUTES: i64 = 1;
    /// The longest permitted hold duration in minutes.
    pub const MAX_MINUTES: i64 = 60;

    /// Creates a `HoldDuration` from an optional requested value, clamping
    /// into the permitted range.
    ///
    /// # Arguments
    ///
    /// * `requested` - The requested duration in minutes, if any
    #[must_use]
    pub const fn from_request(requested: Option<i64>) -> Self {
        let minutes: i64 = match requested {
            Some(m) if m < Self::MIN_MINUTES => Self::MIN_MINUTES,
            Some(m) if m > Self::MAX_MINUTES => Self::MAX_MINUTES,
            Some(m) => m,
            None => Self::DEFAULT_MINUTES,
        };
        Self { minutes }
    }

    /// Returns the effective duration in minutes.
    #[must_use]
    pub const fn minutes(&self) -> i64 {
        self.minutes
    }
}

impl Default for HoldDuration {
    fn default() -> Self {
        Self::from_request(None)
    }
}
