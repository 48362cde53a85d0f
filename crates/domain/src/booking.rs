// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::BookingStatus;
use crate::otp::Otp;
use crate::types::{LatLng, VehicleClass};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One passenger on a buggy booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub organization: String,
}

/// One weighted item on a cargo booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightItem {
    pub name: String,
    pub weight: f64,
}

/// Free-form single-item detail attached to a cargo booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub name: String,
    pub weight: f64,
}

/// What a booking carries, keyed by the requested vehicle class.
///
/// Exactly one variant applies to any booking: buggy bookings carry a
/// passenger list, cargo bookings carry weighted items. The pairing is
/// validated at creation time by [`crate::validate_manifest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Manifest {
    /// Passenger list for a buggy booking.
    Passengers { passengers: Vec<Passenger> },
    /// Weighted-item list for a truck or bot booking.
    Cargo {
        items: Vec<WeightItem>,
        detail: Option<ItemDetail>,
    },
}

impl Manifest {
    /// Returns the number of passengers on this manifest (0 for cargo).
    #[must_use]
    pub fn passenger_count(&self) -> usize {
        match self {
            Self::Passengers { passengers } => passengers.len(),
            Self::Cargo { .. } => 0,
        }
    }
}

/// One transport request with its associated lifecycle state.
///
/// Bookings are created by the lifecycle controller, mutated only through
/// the lifecycle controller (status, verification, emergency reason) and
/// the matching engine (`vehicle_id`, under a claim transaction), and
/// never deleted: terminal bookings are retained as trip history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: i64,
    pub requester_id: i64,
    pub campus_id: i64,
    pub origin: LatLng,
    pub origin_address: String,
    pub destination: LatLng,
    pub destination_address: String,
    pub vehicle_class: VehicleClass,
    /// Set only after a successful vehicle claim.
    pub vehicle_id: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub schedule: OffsetDateTime,
    pub status: BookingStatus,
    pub otp: Otp,
    pub otp_verified: bool,
    pub manifest: Manifest,
    pub emergency_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Booking {
    /// Returns true if the booking currently holds a vehicle claim.
    #[must_use]
    pub const fn has_vehicle(&self) -> bool {
        self.vehicle_id.is_some()
    }
}
