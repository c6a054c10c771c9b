// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The requested quantity is not a positive integer.
    InvalidQuantity {
        /// The quantity that was rejected.
        quantity: i32,
    },
    /// The session identifier is empty or otherwise unusable.
    InvalidSessionId(String),
    /// An attendee field failed validation.
    InvalidAttendee {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the problem.
        message: String,
    },
    /// A price value is negative or unparseable.
    InvalidPrice(String),
    /// An event status string is not recognised.
    InvalidEventStatus(String),
    /// A visibility string is not recognised.
    InvalidVisibility(String),
    /// A slot status string is not recognised.
    InvalidSlotStatus(String),
    /// A booking status string is not recognised.
    InvalidBookingStatus(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuantity { quantity } => {
                write!(f, "Invalid quantity: {quantity}. Must be a positive integer")
            }
            Self::InvalidSessionId(msg) => write!(f, "Invalid session id: {msg}"),
            Self::InvalidAttendee { field, message } => {
                write!(f, "Invalid attendee field '{field}': {message}")
            }
            Self::InvalidPrice(msg) => write!(f, "Invalid price: {msg}"),
            Self::InvalidEventStatus(value) => write!(f, "Invalid event status: '{value}'"),
            Self::InvalidVisibility(value) => write!(f, "Invalid visibility: '{value}'"),
            Self::InvalidSlotStatus(value) => write!(f, "Invalid slot status: '{value}'"),
            Self::InvalidBookingStatus(value) => write!(f, "Invalid booking status: '{value}'"),
        }
    }
}

impl std::error::Error for DomainError {}
