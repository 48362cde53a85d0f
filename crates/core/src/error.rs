// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use campus_transit_domain::{BookingStatus, DomainError, VehicleClass};

/// Why an operation conflicted with the current state of a record.
///
/// Conflicts are idempotency guards: the caller's request is well-formed
/// but the record has already moved past the point where it applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictReason {
    /// The booking already holds a vehicle claim.
    VehicleAlreadyAssigned { booking_id: i64 },
    /// The booking is already cancelled.
    AlreadyCancelled { booking_id: i64 },
    /// The booking is already emergency-stopped.
    AlreadyStopped { booking_id: i64 },
    /// The booking is in a terminal state and cannot be matched.
    BookingClosed {
        booking_id: i64,
        status: BookingStatus,
    },
    /// The requested status change violates the lifecycle table.
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
    /// The driver already holds another vehicle.
    DriverAlreadyAssigned { driver_id: i64, vehicle_id: i64 },
    /// The vehicle already has an assigned driver.
    VehicleHasDriver { vehicle_id: i64 },
    /// A vehicle with this identifier already exists.
    DuplicateIdentifier { identifier: String },
    /// A campus with the same name and location already exists.
    DuplicateCampus { name: String },
    /// The record changed underneath this operation; nothing was applied.
    ConcurrentUpdate { booking_id: i64 },
}

impl std::fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VehicleAlreadyAssigned { booking_id } => {
                write!(f, "Booking {booking_id} already has a vehicle assigned")
            }
            Self::AlreadyCancelled { booking_id } => {
                write!(f, "Booking {booking_id} is already cancelled")
            }
            Self::AlreadyStopped { booking_id } => {
                write!(f, "Booking {booking_id} is already emergency stopped")
            }
            Self::BookingClosed { booking_id, status } => {
                write!(f, "Booking {booking_id} is closed (status: {status})")
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "Status transition {from} -> {to} is not permitted")
            }
            Self::DriverAlreadyAssigned {
                driver_id,
                vehicle_id,
            } => {
                write!(
                    f,
                    "Driver {driver_id} is already assigned to vehicle {vehicle_id}"
                )
            }
            Self::VehicleHasDriver { vehicle_id } => {
                write!(f, "Vehicle {vehicle_id} already has an assigned driver")
            }
            Self::DuplicateIdentifier { identifier } => {
                write!(f, "A vehicle with identifier '{identifier}' already exists")
            }
            Self::DuplicateCampus { name } => {
                write!(
                    f,
                    "A campus named '{name}' already exists at that location"
                )
            }
            Self::ConcurrentUpdate { booking_id } => {
                write!(
                    f,
                    "Booking {booking_id} was modified concurrently; no change applied"
                )
            }
        }
    }
}

/// Errors returned by the matching engine and the lifecycle controller.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Input violated a domain rule. The caller's fault; no retry implied.
    Validation(DomainError),
    /// A referenced booking, vehicle, or campus does not exist.
    NotFound {
        resource: &'static str,
        key: String,
    },
    /// The operation no longer applies to the record's current state.
    Conflict(ConflictReason),
    /// The submitted passcode does not match the booking's passcode.
    InvalidOtp { booking_id: i64 },
    /// No eligible vehicle is free. Transient; the caller may retry later.
    NoAvailableVehicle { vehicle_class: VehicleClass },
    /// The record store failed. Surfaced as an internal failure.
    Store(StoreError),
}

impl CoreError {
    pub(crate) fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound {
            resource,
            key: id.to_string(),
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "Validation failed: {err}"),
            Self::NotFound { resource, key } => write!(f, "{resource} '{key}' not found"),
            Self::Conflict(reason) => write!(f, "Conflict: {reason}"),
            Self::InvalidOtp { booking_id } => {
                write!(f, "Invalid passcode for booking {booking_id}")
            }
            Self::NoAvailableVehicle { vehicle_class } => {
                write!(f, "No available {vehicle_class} in the fleet")
            }
            Self::Store(err) => write!(f, "Record store failure: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
