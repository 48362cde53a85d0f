// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain rule validation.
//!
//! Manifest validation runs at booking creation; matching never
//! re-examines cargo contents, so anything accepted here is dispatchable.

use crate::booking::Manifest;
use crate::error::DomainError;
use crate::types::{Capacity, VehicleClass};

/// Validates that a manifest fits the requested vehicle class.
///
/// Buggy bookings must carry between 1 and 3 passengers with contact
/// details. Cargo bookings (truck or bot) must carry between 1 and 3
/// weighted items, each with a positive finite weight.
///
/// # Errors
///
/// Returns `DomainError::ManifestMismatch` describing the first violation
/// found.
pub fn validate_manifest(
    vehicle_class: VehicleClass,
    manifest: &Manifest,
) -> Result<(), DomainError> {
    let mismatch = |reason: String| DomainError::ManifestMismatch {
        vehicle_class: vehicle_class.as_str(),
        reason,
    };

    match (vehicle_class, manifest) {
        (VehicleClass::Buggy, Manifest::Passengers { passengers }) => {
            if passengers.is_empty() {
                return Err(mismatch(String::from(
                    "a buggy booking requires at least one passenger",
                )));
            }
            if passengers.len() > usize::from(Capacity::MAX) {
                return Err(mismatch(format!(
                    "a buggy carries at most {} passengers, got {}",
                    Capacity::MAX,
                    passengers.len()
                )));
            }
            for passenger in passengers {
                if passenger.name.trim().is_empty() {
                    return Err(mismatch(String::from("passenger name must not be empty")));
                }
                if passenger.phone.trim().is_empty() {
                    return Err(mismatch(format!(
                        "passenger '{}' is missing a phone number",
                        passenger.name
                    )));
                }
                if passenger.email.trim().is_empty() {
                    return Err(mismatch(format!(
                        "passenger '{}' is missing an email address",
                        passenger.name
                    )));
                }
            }
            Ok(())
        }
        (VehicleClass::TransportTruck | VehicleClass::Bot, Manifest::Cargo { items, detail }) => {
            if items.is_empty() {
                return Err(mismatch(String::from(
                    "a cargo booking requires at least one weighted item",
                )));
            }
            if items.len() > usize::from(Capacity::MAX) {
                return Err(mismatch(format!(
                    "a cargo booking carries at most {} items, got {}",
                    Capacity::MAX,
                    items.len()
                )));
            }
            for item in items {
                if item.name.trim().is_empty() {
                    return Err(mismatch(String::from("item name must not be empty")));
                }
                if !(item.weight.is_finite() && item.weight > 0.0) {
                    return Err(mismatch(format!(
                        "item '{}' must have a positive weight",
                        item.name
                    )));
                }
            }
            if let Some(detail) = detail
                && !(detail.weight.is_finite() && detail.weight > 0.0)
            {
                return Err(mismatch(format!(
                    "item detail '{}' must have a positive weight",
                    detail.name
                )));
            }
            Ok(())
        }
        (VehicleClass::Buggy, Manifest::Cargo { .. }) => Err(mismatch(String::from(
            "a buggy booking requires a passenger manifest, not cargo",
        ))),
        (VehicleClass::TransportTruck | VehicleClass::Bot, Manifest::Passengers { .. }) => {
            Err(mismatch(String::from(
                "a cargo booking requires a weighted-item manifest, not passengers",
            )))
        }
    }
}

/// Validates a fleet vehicle identifier.
///
/// # Errors
///
/// Returns `DomainError::InvalidIdentifier` if the identifier is empty or
/// whitespace-only.
pub fn validate_identifier(identifier: &str) -> Result<(), DomainError> {
    if identifier.trim().is_empty() {
        return Err(DomainError::InvalidIdentifier(String::from(
            "identifier must not be empty",
        )));
    }
    Ok(())
}
