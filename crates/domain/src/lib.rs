// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for the Holdfast slot reservation system.
//!
//! This crate defines the value types shared by every other crate: event,
//! slot, hold, and booking vocabulary, plus the validation rules that make a
//! request admissible (positive quantity, non-empty session, well-formed
//! attendee). It performs no I/O and holds no state.

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

mod attendee;
mod error;
mod price;
mod types;

pub use attendee::Attendee;
pub use error::DomainError;
pub use price::Price;
pub use types::{
    BookingStatus, EventStatus, HoldDuration, Quantity, SessionId, SlotStatus, Visibility,
};
