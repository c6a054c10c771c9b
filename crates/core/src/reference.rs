// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking-reference generation.
//!
//! References are eight uppercase alphanumerics, intended to be read aloud.
//! Ambiguous characters are not excluded. The space holds ~2.8e12 values, so
//! the uniqueness-retry loop in the persistence layer is expected to need at
//! most two iterations at realistic volumes.

use rand::Rng;

/// The length of a booking reference.
pub const BOOKING_REFERENCE_LENGTH: usize = 8;

/// The booking-reference alphabet.
const CHARSET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a candidate booking reference.
///
/// Uniqueness is the caller's responsibility: generate, attempt the insert,
/// retry on a uniqueness violation.
///
/// # Arguments
///
/// * `rng` - The random source
pub fn generate_booking_reference<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..BOOKING_REFERENCE_LENGTH)
        .map(|_| {
            let idx: usize = rng.gen_range(0..CHARSET.len());
            char::from(CHARSET[idx])
        })
        .collect()
}

/// Returns whether a string has the booking-reference shape.
///
/// # Arguments
///
/// * `value` - The candidate string
#[must_use]
pub fn is_booking_reference(value: &str) -> bool {
    value.len() == BOOKING_REFERENCE_LENGTH
        && value.bytes().all(|b| CHARSET.contains(&b))
}
