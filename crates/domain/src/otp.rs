// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A one-time passcode used to verify rider presence at pickup.
///
/// An OTP is exactly 4 decimal digits. Leading zeros are significant, so
/// the value is kept as text rather than a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Otp(String);

impl Otp {
    /// Generates a fresh random 4-digit passcode.
    #[must_use]
    pub fn generate() -> Self {
        let code: u16 = rand::rng().random_range(0..10_000);
        Self(format!("{code:04}"))
    }

    /// Creates an `Otp` from its text representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOtp` if the value is not exactly 4
    /// ASCII digits.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::InvalidOtp(
                "passcode must be exactly 4 decimal digits",
            ))
        }
    }

    /// Returns the passcode text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Constant-shape comparison against a submitted code.
    #[must_use]
    pub fn matches(&self, submitted: &Self) -> bool {
        self.0 == submitted.0
    }
}
