// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A validated attendee payload for booking confirmation.
///
/// Construction trims whitespace on every field and rejects empty names and
/// implausible email addresses. Once constructed, the payload is known-good
/// and can be persisted without further checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// The attendee's first name (non-empty after trimming).
    first_name: String,
    /// The attendee's last name (non-empty after trimming).
    last_name: String,
    /// The attendee's email address.
    email: String,
    /// Optional phone number.
    phone: Option<String>,
    /// Optional free-form notes.
    notes: Option<String>,
}

impl Attendee {
    /// Creates a new validated `Attendee`.
    ///
    /// # Arguments
    ///
    /// * `first_name` - The attendee's first name
    /// * `last_name` - The attendee's last name
    /// * `email` - The attendee's email address
    /// * `phone` - Optional phone number
    /// * `notes` - Optional free-form notes
    ///
    /// # Errors
    ///
    /// Returns an error if either name is empty after trimming or the email
    /// does not pass the conservative plausibility check.
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Self, DomainError> {
        let first_name: &str = first_name.trim();
        if first_name.is_empty() {
            return Err(DomainError::InvalidAttendee {
                field: String::from("first_name"),
                message: String::from("must be non-empty"),
            });
        }

        let last_name: &str = last_name.trim();
        if last_name.is_empty() {
            return Err(DomainError::InvalidAttendee {
                field: String::from("last_name"),
                message: String::from("must be non-empty"),
            });
        }

        let email: &str = email.trim();
        if !is_plausible_email(email) {
            return Err(DomainError::InvalidAttendee {
                field: String::from("email"),
                message: format!("'{email}' is not a valid email address"),
            });
        }

        let phone: Option<String> = phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToString::to_string);
        let notes: Option<String> = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(ToString::to_string);

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone,
            notes,
        })
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the phone number, if provided.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the notes, if provided.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Conservative email plausibility check.
///
/// Accepts `local@domain` where both parts are non-empty, the domain contains
/// an interior dot, and no whitespace appears anywhere. Deliverability is not
/// the domain layer's problem; this check only rejects obvious garbage.
fn is_plausible_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    // The domain needs an interior dot: "a.b", not ".b" or "a.".
    match domain.split_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}
