// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Capacity, LatLng, VehicleClass};
use serde::{Deserialize, Serialize};

// Seat filtering happens store-side; see `TransitStore::available_vehicles`.

/// One physical unit in the campus fleet.
///
/// Invariants: `is_booked` is true iff the vehicle is currently claimed by
/// exactly one non-terminal booking, and a vehicle has at most one
/// assigned driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_id: i64,
    pub vehicle_class: VehicleClass,
    /// Fleet-unique call sign, e.g. "BUGGY-07".
    pub identifier: String,
    pub capacity: Capacity,
    pub location: LatLng,
    pub driver_id: Option<i64>,
    pub is_booked: bool,
    pub created_at: String,
    pub updated_at: String,
}
