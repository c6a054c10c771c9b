// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability arithmetic and the capacity guard.
//!
//! These functions are the single source of truth for "how many seats can
//! this caller still take on this slot". They run over row snapshots loaded
//! inside a transaction, so every decision observes one consistent state.

use crate::{HoldState, SlotState};
use holdfast_domain::{EventStatus, Visibility};

/// Sums the seat quantity held by live holds on a slot.
///
/// A hold counts while it is active and unexpired at `now`. When
/// `exclude_session` is given, that session's holds are skipped: a caller
/// refreshing the availability list mid-booking must not see their own
/// reservation counted against them.
///
/// # Arguments
///
/// * `holds` - The slot's hold rows
/// * `now` - The observation time (fixed-width UTC text)
/// * `exclude_session` - A session whose holds are not counted, if any
#[must_use]
pub fn active_held_quantity(
    holds: &[HoldState],
    now: &str,
    exclude_session: Option<&str>,
) -> i64 {
    holds
        .iter()
        .filter(|h| h.is_live(now))
        .filter(|h| exclude_session != Some(h.session_id.as_str()))
        .map(|h| i64::from(h.quantity))
        .sum()
}

/// Computes the seats a specific caller could still reserve on a slot.
///
/// `effective_available = (total_capacity - booked_count) - Σ live holds of
/// other sessions`. Pass `None` for the session-agnostic figure used by
/// pre-flight checks.
///
/// The result may be negative when holds briefly overlapped; callers treat
/// anything non-positive as "no seats".
///
/// # Arguments
///
/// * `slot` - The slot snapshot
/// * `holds` - The slot's hold rows
/// * `now` - The observation time (fixed-width UTC text)
/// * `for_session` - The caller's session, whose own holds are excluded
#[must_use]
pub fn effective_available(
    slot: &SlotState,
    holds: &[HoldState],
    now: &str,
    for_session: Option<&str>,
) -> i64 {
    slot.available_count() - active_held_quantity(holds, now, for_session)
}

/// Computes the residual capacity when a specific hold is about to convert.
///
/// The converting hold is excluded from the subtracted set because its
/// quantity is being turned into `booked_count`, not double-counted. If the
/// result is smaller than the hold's quantity, a race let two holds briefly
/// overlap (or `booked_count` drifted via direct admin action) and the
/// conversion must be refused.
///
/// # Arguments
///
/// * `slot` - The slot snapshot
/// * `holds` - The slot's hold rows
/// * `now` - The observation time (fixed-width UTC text)
/// * `converting_hold_id` - The hold being converted into a booking
#[must_use]
pub fn residual_capacity(
    slot: &SlotState,
    holds: &[HoldState],
    now: &str,
    converting_hold_id: i64,
) -> i64 {
    let held_by_others: i64 = holds
        .iter()
        .filter(|h| h.hold_id != converting_hold_id)
        .filter(|h| h.is_live(now))
        .map(|h| i64::from(h.quantity))
        .sum();
    slot.available_count() - held_by_others
}

/// Why a slot refused a reservation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotUnavailableReason {
    /// The slot's status is not `available`.
    SlotNotAvailable(holdfast_domain::SlotStatus),
    /// The slot's start time is not in the future.
    SlotInPast,
    /// The owning event is not in `active` status.
    EventNotActive(EventStatus),
    /// The owning event's visibility does not permit booking.
    EventNotBookable(Visibility),
}

impl std::fmt::Display for SlotUnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SlotNotAvailable(status) => {
                write!(f, "slot is not available (status: {status})")
            }
            Self::SlotInPast => write!(f, "slot start time has passed"),
            Self::EventNotActive(status) => {
                write!(f, "event is not active (status: {status})")
            }
            Self::EventNotBookable(visibility) => {
                write!(f, "event is not bookable (visibility: {visibility})")
            }
        }
    }
}

/// Checks whether a slot may take new holds at `now`.
///
/// A slot is bookable when the owning event is `active` with a bookable
/// visibility, the slot's status is `available`, and its start time is
/// strictly in the future.
///
/// # Arguments
///
/// * `event_status` - The owning event's status
/// * `visibility` - The owning event's visibility
/// * `slot` - The slot snapshot
/// * `now` - The observation time (fixed-width UTC text)
///
/// # Errors
///
/// Returns the first reason the slot is not bookable.
pub fn check_bookable(
    event_status: EventStatus,
    visibility: Visibility,
    slot: &SlotState,
    now: &str,
) -> Result<(), SlotUnavailableReason> {
    if !event_status.is_active() {
        return Err(SlotUnavailableReason::EventNotActive(event_status));
    }
    if !visibility.is_bookable() {
        return Err(SlotUnavailableReason::EventNotBookable(visibility));
    }
    if slot.status != holdfast_domain::SlotStatus::Available {
        return Err(SlotUnavailableReason::SlotNotAvailable(slot.status));
    }
    if slot.start_time.as_str() <= now {
        return Err(SlotUnavailableReason::SlotInPast);
    }
    Ok(())
}

/// The verdict on a hold's validity at one observation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoldVerdict {
    /// The hold is active and unexpired.
    Valid {
        /// When the hold lapses.
        expires_at: String,
    },
    /// No hold with the given id exists.
    NotFound,
    /// The hold was released or consumed earlier.
    Released {
        /// The expiry the hold carried.
        expires_at: String,
    },
    /// The hold's expiry has passed. The row still reads active and needs
    /// the self-healing deactivation committed.
    Expired {
        /// The expiry that passed.
        expires_at: String,
    },
}

impl HoldVerdict {
    /// Returns whether the verdict is `Valid`.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Returns the stable reason string for invalid verdicts.
    #[must_use]
    pub const fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Valid { .. } => None,
            Self::NotFound => Some("not found"),
            Self::Released { .. } => Some("released"),
            Self::Expired { .. } => Some("expired"),
        }
    }
}

/// Judges a hold's validity at `now`.
///
/// The verdict distinguishes missing, released, and expired holds because
/// the caller's recovery differs by kind. An `Expired` verdict obliges the
/// observer to commit the idempotent self-healing transition
/// (`is_active := false, released_at := now`).
///
/// # Arguments
///
/// * `hold` - The hold snapshot, if the row exists
/// * `now` - The observation time (fixed-width UTC text)
#[must_use]
pub fn verify_hold_state(hold: Option<&HoldState>, now: &str) -> HoldVerdict {
    let Some(hold) = hold else {
        return HoldVerdict::NotFound;
    };
    if !hold.is_active {
        return HoldVerdict::Released {
            expires_at: hold.expires_at.clone(),
        };
    }
    if hold.expires_at.as_str() <= now {
        return HoldVerdict::Expired {
            expires_at: hold.expires_at.clone(),
        };
    }
    HoldVerdict::Valid {
        expires_at: hold.expires_at.clone(),
    }
}
