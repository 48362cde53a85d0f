// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use campus_transit::{ConflictReason, CoreError};
use campus_transit_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Each variant corresponds to one class of HTTP status the
/// server maps onto; core and domain errors are translated explicitly
/// and never leaked through the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request was well-formed but no longer applies to the record.
    Conflict {
        /// The invariant or guard the request ran into.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The submitted pickup passcode does not match.
    InvalidPasscode {
        /// The booking the passcode was submitted for.
        booking_id: i64,
    },
    /// No eligible vehicle is free; the caller may retry later.
    NoVehicleAvailable {
        /// The vehicle class that was requested.
        vehicle_class: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::InvalidPasscode { booking_id } => {
                write!(f, "Invalid passcode for booking {booking_id}")
            }
            Self::NoVehicleAvailable { vehicle_class } => {
                write!(f, "No available {vehicle_class} in the fleet")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MissingField(field) => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Field '{field}' is required"),
        },
        DomainError::InvalidVehicleClass(value) => ApiError::InvalidInput {
            field: String::from("vehicle_class"),
            message: format!("'{value}' is not a recognized vehicle class"),
        },
        DomainError::InvalidBookingStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("'{value}' is not a recognized booking status"),
        },
        DomainError::InvalidOtp(reason) => ApiError::InvalidInput {
            field: String::from("otp"),
            message: reason.to_string(),
        },
        DomainError::ManifestMismatch {
            vehicle_class,
            reason,
        } => ApiError::InvalidInput {
            field: String::from("manifest"),
            message: format!("Manifest does not fit class '{vehicle_class}': {reason}"),
        },
        DomainError::InvalidCapacity { field, value } => ApiError::InvalidInput {
            field: format!("capacity.{field}"),
            message: format!("Value {value} is outside the permitted 1..=3 range"),
        },
        DomainError::InvalidIdentifier(reason) => ApiError::InvalidInput {
            field: String::from("identifier"),
            message: reason,
        },
        DomainError::InvalidSchedule(value) => ApiError::InvalidInput {
            field: String::from("schedule"),
            message: format!("'{value}' is not an RFC 3339 instant"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Validation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotFound { resource, key } => ApiError::ResourceNotFound {
            resource_type: capitalize(resource),
            message: format!("{resource} '{key}' does not exist"),
        },
        CoreError::Conflict(reason) => ApiError::Conflict {
            rule: conflict_rule(&reason).to_string(),
            message: reason.to_string(),
        },
        CoreError::InvalidOtp { booking_id } => ApiError::InvalidPasscode { booking_id },
        CoreError::NoAvailableVehicle { vehicle_class } => ApiError::NoVehicleAvailable {
            vehicle_class: vehicle_class.to_string(),
        },
        CoreError::Store(store_err) => ApiError::Internal {
            message: format!("Record store failure: {store_err}"),
        },
    }
}

/// Stable machine-readable tag for each conflict class.
const fn conflict_rule(reason: &ConflictReason) -> &'static str {
    match reason {
        ConflictReason::VehicleAlreadyAssigned { .. } => "vehicle_already_assigned",
        ConflictReason::AlreadyCancelled { .. } => "already_cancelled",
        ConflictReason::AlreadyStopped { .. } => "already_stopped",
        ConflictReason::BookingClosed { .. } => "booking_closed",
        ConflictReason::InvalidTransition { .. } => "invalid_transition",
        ConflictReason::DriverAlreadyAssigned { .. } => "driver_already_assigned",
        ConflictReason::VehicleHasDriver { .. } => "vehicle_has_driver",
        ConflictReason::DuplicateIdentifier { .. } => "unique_identifier",
        ConflictReason::DuplicateCampus { .. } => "unique_campus",
        ConflictReason::ConcurrentUpdate { .. } => "concurrent_update",
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
