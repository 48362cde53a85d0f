// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The vehicle matching engine.
//!
//! Given an unassigned booking, selects an eligible free vehicle and
//! claims it through the store's atomic compare-and-set. Two concurrent
//! assignment calls can both see the same candidate, but only one claim
//! succeeds; the loser falls through to the next candidate.

use crate::error::{ConflictReason, CoreError};
use crate::store::TransitStore;
use campus_transit_domain::{Booking, VehicleClass};
use tracing::{debug, info};

/// Assigns an eligible, available vehicle to a booking.
///
/// Buggy bookings require a buggy with enough seats for the passenger
/// manifest; truck and bot bookings match on class alone (cargo limits
/// were enforced at creation). Candidates are walked in ascending
/// vehicle-id order so selection is deterministic.
///
/// Notification is not triggered here; it already happened when the
/// booking was created.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if the booking does not exist.
/// - [`CoreError::Conflict`] if the booking already holds a vehicle or is
///   in a terminal state.
/// - [`CoreError::NoAvailableVehicle`] if every eligible vehicle is
///   booked (or claimed mid-race by another assignment).
/// - [`CoreError::Store`] if the record store fails.
pub fn assign_vehicle<S: TransitStore>(
    store: &mut S,
    booking_id: i64,
) -> Result<Booking, CoreError> {
    let booking = store
        .booking(booking_id)?
        .ok_or_else(|| CoreError::not_found("booking", booking_id))?;

    if booking.has_vehicle() {
        return Err(CoreError::Conflict(ConflictReason::VehicleAlreadyAssigned {
            booking_id,
        }));
    }
    if booking.status.is_terminal() {
        return Err(CoreError::Conflict(ConflictReason::BookingClosed {
            booking_id,
            status: booking.status,
        }));
    }

    let min_seats = match booking.vehicle_class {
        VehicleClass::Buggy => {
            Some(u8::try_from(booking.manifest.passenger_count()).unwrap_or(u8::MAX))
        }
        VehicleClass::TransportTruck | VehicleClass::Bot => None,
    };

    let candidates = store.available_vehicles(booking.vehicle_class, min_seats)?;

    for vehicle in candidates {
        if store.claim_vehicle(booking_id, vehicle.vehicle_id)? {
            info!(
                booking_id,
                vehicle_id = vehicle.vehicle_id,
                identifier = %vehicle.identifier,
                "vehicle claimed for booking"
            );
            return store
                .booking(booking_id)?
                .ok_or_else(|| CoreError::not_found("booking", booking_id));
        }

        // Lost the race for this vehicle. If the booking itself was
        // assigned concurrently, stop walking candidates.
        let current = store
            .booking(booking_id)?
            .ok_or_else(|| CoreError::not_found("booking", booking_id))?;
        if current.has_vehicle() {
            return Err(CoreError::Conflict(ConflictReason::VehicleAlreadyAssigned {
                booking_id,
            }));
        }
        debug!(
            booking_id,
            vehicle_id = vehicle.vehicle_id,
            "claim lost to a concurrent assignment, trying next candidate"
        );
    }

    Err(CoreError::NoAvailableVehicle {
        vehicle_class: booking.vehicle_class,
    })
}
