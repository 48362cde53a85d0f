// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking status tracking and transition logic.
//!
//! This module defines booking status states and the explicit transition
//! table. Every status mutation in the system, including the manual status
//! update, is checked against this table.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Booking status states tracking a transport request through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Booking created; rider has not yet confirmed the pickup passcode.
    Unverified,
    /// Pickup passcode confirmed; trip may proceed to completion.
    Verified,
    /// Trip finished normally.
    Completed,
    /// Booking cancelled by the requester or an operator.
    Cancelled,
    /// Trip halted by an emergency stop.
    Emergency,
}

impl BookingStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::Verified => "verified",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Emergency => "emergency",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "unverified" => Ok(Self::Unverified),
            "verified" => Ok(Self::Verified),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "emergency" => Ok(Self::Emergency),
            _ => Err(DomainError::InvalidBookingStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal.
    ///
    /// Terminal bookings are retained for history and never transition
    /// again; any vehicle they held has been released.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Emergency)
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - `Unverified` → `Verified` | `Cancelled` | `Emergency`
    /// - `Verified` → `Completed` | `Cancelled` | `Emergency`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Unverified, Self::Verified)
                | (
                    Self::Unverified | Self::Verified,
                    Self::Cancelled | Self::Emergency
                )
                | (Self::Verified, Self::Completed)
        )
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BookingStatus; 5] = [
        BookingStatus::Unverified,
        BookingStatus::Verified,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
        BookingStatus::Emergency,
    ];

    #[test]
    fn test_status_string_round_trip() {
        for status in ALL {
            let s = status.as_str();
            match BookingStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_status_string() {
        assert!(BookingStatus::parse_str("in_flight").is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!BookingStatus::Unverified.is_terminal());
        assert!(!BookingStatus::Verified.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Emergency.is_terminal());
    }

    #[test]
    fn test_valid_transitions_from_unverified() {
        let current = BookingStatus::Unverified;

        assert!(current.can_transition_to(BookingStatus::Verified));
        assert!(current.can_transition_to(BookingStatus::Cancelled));
        assert!(current.can_transition_to(BookingStatus::Emergency));
    }

    #[test]
    fn test_unverified_booking_cannot_complete() {
        assert!(!BookingStatus::Unverified.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn test_valid_transitions_from_verified() {
        let current = BookingStatus::Verified;

        assert!(current.can_transition_to(BookingStatus::Completed));
        assert!(current.can_transition_to(BookingStatus::Cancelled));
        assert!(current.can_transition_to(BookingStatus::Emergency));
        assert!(!current.can_transition_to(BookingStatus::Unverified));
    }

    #[test]
    fn test_no_transitions_from_terminal_states() {
        for terminal in [
            BookingStatus::Completed,
            BookingStatus::Cancelled,
            BookingStatus::Emergency,
        ] {
            for target in ALL {
                assert!(
                    !terminal.can_transition_to(target),
                    "{terminal} -> {target} should be rejected"
                );
            }
        }
    }
}
