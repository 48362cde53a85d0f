// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was absent from a request.
    MissingField(&'static str),
    /// Vehicle class string is not one of the enumerated classes.
    InvalidVehicleClass(String),
    /// Booking status string is not a known status.
    InvalidBookingStatus(String),
    /// A passcode value is malformed.
    InvalidOtp(&'static str),
    /// The manifest variant does not fit the requested vehicle class.
    ManifestMismatch {
        /// The requested vehicle class.
        vehicle_class: &'static str,
        /// Why the manifest is rejected.
        reason: String,
    },
    /// A capacity field is outside the permitted 1..=3 range.
    InvalidCapacity {
        /// The capacity field name.
        field: &'static str,
        /// The rejected value.
        value: u8,
    },
    /// A vehicle identifier is empty or malformed.
    InvalidIdentifier(String),
    /// A schedule string could not be parsed as an RFC 3339 instant.
    InvalidSchedule(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing required field: {field}"),
            Self::InvalidVehicleClass(class) => write!(f, "Invalid vehicle class: {class}"),
            Self::InvalidBookingStatus(status) => write!(f, "Invalid booking status: {status}"),
            Self::InvalidOtp(msg) => write!(f, "Invalid passcode: {msg}"),
            Self::ManifestMismatch {
                vehicle_class,
                reason,
            } => {
                write!(f, "Manifest rejected for {vehicle_class} booking: {reason}")
            }
            Self::InvalidCapacity { field, value } => {
                write!(f, "Invalid capacity.{field}: {value}. Must be between 1 and 3")
            }
            Self::InvalidIdentifier(msg) => write!(f, "Invalid vehicle identifier: {msg}"),
            Self::InvalidSchedule(msg) => write!(f, "Invalid schedule: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
