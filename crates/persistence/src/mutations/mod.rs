// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence
//! layer. Most mutations use Diesel DSL and are backend-agnostic, with
//! minimal use of backend-specific helpers (e.g., `last_insert_rowid()` for
//! `SQLite`).
//!
//! ## Module Organization
//!
//! - `holds` — The two-phase hold protocol: create, verify, release, sweep
//! - `bookings` — The booking finaliser (hold consumption inside one transaction)
//! - `attempts` — Append-only booking-attempt records
//! - `catalog` — Event and slot administration (seeding, out-of-band edits)
//!
//! ## Transaction Discipline
//!
//! `create_hold` and `confirm_booking` run their entire decision inside one
//! `conn.transaction`, re-reading every row they depend on. Nothing outside
//! a transaction is ever trusted for a capacity decision.

pub mod attempts;
pub mod bookings;
pub mod catalog;
pub mod holds;

pub use attempts::{record_attempt_mysql, record_attempt_sqlite};
pub use bookings::{
    confirm_booking_mysql, confirm_booking_sqlite, record_failed_confirm_mysql,
    record_failed_confirm_sqlite,
};
pub use catalog::{
    cancel_time_slot_mysql, cancel_time_slot_sqlite, create_event_mysql, create_event_sqlite,
    create_time_slot_mysql, create_time_slot_sqlite, set_slot_booked_count_mysql,
    set_slot_booked_count_sqlite,
};
pub use holds::{
    create_hold_mysql, create_hold_sqlite, release_expired_holds_mysql,
    release_expired_holds_sqlite, release_hold_mysql, release_hold_sqlite, verify_hold_mysql,
    verify_hold_sqlite,
};
