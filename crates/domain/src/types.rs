// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The class of a fleet vehicle.
///
/// Buggies carry passengers; transport trucks and delivery bots carry
/// goods. The class decides which manifest variant a booking must carry
/// and which matching rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    /// Passenger buggy (up to 3 seats).
    Buggy,
    /// Cargo truck for heavier items.
    #[serde(rename = "Transport Truck")]
    TransportTruck,
    /// Autonomous delivery bot for small items.
    Bot,
}

impl VehicleClass {
    /// Returns the wire representation of the class.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buggy => "Buggy",
            Self::TransportTruck => "Transport Truck",
            Self::Bot => "Bot",
        }
    }

    /// Returns true if vehicles of this class carry goods rather than seats.
    #[must_use]
    pub const fn is_cargo(&self) -> bool {
        matches!(self, Self::TransportTruck | Self::Bot)
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Buggy" => Ok(Self::Buggy),
            "Transport Truck" => Ok(Self::TransportTruck),
            "Bot" => Ok(Self::Bot),
            _ => Err(DomainError::InvalidVehicleClass(s.to_string())),
        }
    }
}

impl FromStr for VehicleClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Vehicle capacity limits.
///
/// Both fields are bounded to the fleet-wide range 1..=3: buggies seat at
/// most 3 passengers and cargo vehicles carry at most 3 weighted items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    passengers: u8,
    weight: u8,
}

impl Capacity {
    /// The maximum value for either capacity field.
    pub const MAX: u8 = 3;

    /// Creates a new `Capacity`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCapacity` if either field is outside 1..=3.
    pub const fn new(passengers: u8, weight: u8) -> Result<Self, DomainError> {
        if passengers < 1 || passengers > Self::MAX {
            return Err(DomainError::InvalidCapacity {
                field: "passengers",
                value: passengers,
            });
        }
        if weight < 1 || weight > Self::MAX {
            return Err(DomainError::InvalidCapacity {
                field: "weight",
                value: weight,
            });
        }
        Ok(Self { passengers, weight })
    }

    /// Returns the maximum number of passengers.
    #[must_use]
    pub const fn passengers(&self) -> u8 {
        self.passengers
    }

    /// Returns the maximum number of weighted items.
    #[must_use]
    pub const fn weight(&self) -> u8 {
        self.weight
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            passengers: Self::MAX,
            weight: Self::MAX,
        }
    }
}
