// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A non-negative slot price.
///
/// Prices are persisted as their canonical decimal string and re-parsed at
/// the boundary, so no floating-point representation ever enters the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// The decimal amount.
    amount: Decimal,
}

impl Price {
    /// Creates a new `Price`.
    ///
    /// # Arguments
    ///
    /// * `amount` - The decimal amount
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative.
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount.is_sign_negative() {
            return Err(DomainError::InvalidPrice(format!(
                "price must be non-negative, got {amount}"
            )));
        }
        Ok(Self { amount })
    }

    /// A zero price.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            amount: Decimal::ZERO,
        }
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: Decimal = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::InvalidPrice(format!("'{s}': {e}")))?;
        Self::new(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.amount)
    }
}
