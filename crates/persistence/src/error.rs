// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
///
/// The reservation-specific variants (`SlotNotFound`, `SlotUnavailable`,
/// `CapacityExceeded`, `HoldInvalid`) carry enough payload for the API layer
/// to translate them into its stable error kinds without re-querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A generic record lookup found nothing.
    NotFound(String),
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
    /// The slot exists but refuses reservations.
    SlotUnavailable {
        /// The slot that refused.
        slot_id: i64,
        /// Why the slot refused.
        reason: String,
    },
    /// The capacity guard failed.
    CapacityExceeded {
        /// The slot whose capacity guard fired.
        slot_id: i64,
        /// The availability observed inside the transaction.
        available: i64,
    },
    /// A hold referenced by confirm/verify is missing, released, or expired.
    HoldInvalid {
        /// The hold that was referenced.
        hold_id: i64,
        /// The stable reason ("not found", "released", "expired").
        reason: String,
    },
    /// A uniqueness constraint was violated.
    Conflict(String),
    /// A transient storage failure: serialisation conflict, lock contention,
    /// or uniqueness-retry exhaustion. Callers may retry once.
    Transient(String),
    /// A query failed for a non-transient reason.
    QueryFailed(String),
    /// The database connection could not be established.
    DatabaseConnectionFailed(String),
    /// Migrations failed to run.
    MigrationFailed(String),
    /// Foreign key enforcement is not active on this connection.
    ForeignKeyEnforcementNotEnabled,
    /// A stored value (status string, timestamp) failed to parse.
    InvalidStored(String),
    /// An error that fits no other category.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::EventNotFound { event_id } => write!(f, "Event {event_id} not found"),
            Self::SlotNotFound { slot_id } => write!(f, "Time slot {slot_id} not found"),
            Self::SlotUnavailable { slot_id, reason } => {
                write!(f, "Time slot {slot_id} is unavailable: {reason}")
            }
            Self::CapacityExceeded { slot_id, available } => {
                write!(
                    f,
                    "Capacity exceeded on slot {slot_id}: {available} seat(s) available"
                )
            }
            Self::HoldInvalid { hold_id, reason } => {
                write!(f, "Hold {hold_id} is invalid: {reason}")
            }
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Transient(msg) => write!(f, "Transient storage failure: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::InvalidStored(msg) => write!(f, "Invalid stored value: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::NotFound => Self::NotFound(String::from("record not found")),
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Conflict(info.message().to_string())
            }
            Error::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
                Self::Transient(info.message().to_string())
            }
            Error::DatabaseError(kind, info) if is_lock_contention(info.message()) => {
                Self::Transient(format!("{kind:?}: {}", info.message()))
            }
            other => Self::QueryFailed(other.to_string()),
        }
    }
}

impl From<holdfast::CoreError> for PersistenceError {
    fn from(err: holdfast::CoreError) -> Self {
        Self::InvalidStored(err.to_string())
    }
}

impl From<holdfast_domain::DomainError> for PersistenceError {
    fn from(err: holdfast_domain::DomainError) -> Self {
        Self::InvalidStored(err.to_string())
    }
}

/// Recognises busy/lock messages that both backends report as generic
/// database errors but which are safe to retry.
fn is_lock_contention(message: &str) -> bool {
    let message: String = message.to_ascii_lowercase();
    message.contains("database is locked")
        || message.contains("lock wait timeout")
        || message.contains("deadlock")
}
