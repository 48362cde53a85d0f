// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fleet-management operations on the vehicle registry.
//!
//! These sit outside the booking lifecycle but must uphold the registry
//! invariants: one driver per vehicle, one vehicle per driver, and a
//! fleet-unique identifier per vehicle.

use crate::error::{ConflictReason, CoreError};
use crate::store::{NewVehicle, TransitStore};
use campus_transit_domain::{Capacity, LatLng, Vehicle, VehicleClass, validate_identifier};
use tracing::info;

/// Where vehicles are parked until their first location report.
pub const DEFAULT_DEPOT: LatLng = LatLng {
    lat: 12.850_078_4,
    lng: 77.663_354_9,
};

/// Onboards a new vehicle into the fleet.
///
/// The vehicle starts unbooked, driverless, and parked at the depot.
///
/// # Errors
///
/// - [`CoreError::Validation`] for an empty identifier or out-of-range
///   capacity (capacity bounds are checked by [`Capacity::new`] upstream).
/// - [`CoreError::Conflict`] if the identifier is already in the fleet.
pub fn create_vehicle<S: TransitStore>(
    store: &mut S,
    vehicle_class: VehicleClass,
    identifier: String,
    capacity: Capacity,
) -> Result<Vehicle, CoreError> {
    validate_identifier(&identifier)?;

    if store.vehicle_by_identifier(&identifier)?.is_some() {
        return Err(CoreError::Conflict(ConflictReason::DuplicateIdentifier {
            identifier,
        }));
    }

    let vehicle = store.insert_vehicle(NewVehicle {
        vehicle_class,
        identifier,
        capacity,
        location: DEFAULT_DEPOT,
    })?;
    info!(
        vehicle_id = vehicle.vehicle_id,
        identifier = %vehicle.identifier,
        class = %vehicle.vehicle_class,
        "vehicle onboarded"
    );
    Ok(vehicle)
}

/// Assigns a driver to a vehicle.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if the vehicle does not exist.
/// - [`CoreError::Conflict`] if the driver already holds a vehicle or
///   the vehicle already has a driver.
pub fn assign_driver<S: TransitStore>(
    store: &mut S,
    vehicle_id: i64,
    driver_id: i64,
) -> Result<Vehicle, CoreError> {
    if let Some(held) = store.vehicle_for_driver(driver_id)? {
        return Err(CoreError::Conflict(ConflictReason::DriverAlreadyAssigned {
            driver_id,
            vehicle_id: held.vehicle_id,
        }));
    }

    let vehicle = store
        .vehicle(vehicle_id)?
        .ok_or_else(|| CoreError::not_found("vehicle", vehicle_id))?;
    if vehicle.driver_id.is_some() {
        return Err(CoreError::Conflict(ConflictReason::VehicleHasDriver {
            vehicle_id,
        }));
    }

    // Conditional on the driver seat still being empty.
    if !store.assign_driver(vehicle_id, driver_id)? {
        return Err(CoreError::Conflict(ConflictReason::VehicleHasDriver {
            vehicle_id,
        }));
    }
    info!(vehicle_id, driver_id, "driver assigned to vehicle");
    store
        .vehicle(vehicle_id)?
        .ok_or_else(|| CoreError::not_found("vehicle", vehicle_id))
}

/// Records a vehicle's latest reported location.
///
/// Broadcast of the update to listeners is outside the core; callers log
/// or forward it as they see fit.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the identifier is unknown.
pub fn update_vehicle_location<S: TransitStore>(
    store: &mut S,
    identifier: &str,
    location: LatLng,
) -> Result<Vehicle, CoreError> {
    store
        .update_vehicle_location(identifier, location)?
        .ok_or_else(|| CoreError::NotFound {
            resource: "vehicle",
            key: identifier.to_string(),
        })
}

/// Loads one vehicle by id.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the vehicle does not exist.
pub fn vehicle_by_id<S: TransitStore>(store: &mut S, vehicle_id: i64) -> Result<Vehicle, CoreError> {
    store
        .vehicle(vehicle_id)?
        .ok_or_else(|| CoreError::not_found("vehicle", vehicle_id))
}

/// The whole fleet.
///
/// # Errors
///
/// Returns [`CoreError::Store`] if the record store fails.
pub fn vehicles<S: TransitStore>(store: &mut S) -> Result<Vec<Vehicle>, CoreError> {
    Ok(store.vehicles()?)
}

/// The vehicle a driver currently holds.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the driver holds no vehicle.
pub fn vehicle_for_driver<S: TransitStore>(
    store: &mut S,
    driver_id: i64,
) -> Result<Vehicle, CoreError> {
    store
        .vehicle_for_driver(driver_id)?
        .ok_or_else(|| CoreError::not_found("driver", driver_id))
}
