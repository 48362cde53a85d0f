// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod vehicle_store_tests;

use crate::Persistence;
use campus_transit::{NewBooking, NewCampus, NewVehicle, TransitStore};
use campus_transit_domain::{
    Booking, Campus, Capacity, LatLng, Manifest, Otp, Passenger, Vehicle, VehicleClass, WeightItem,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const TEST_NOW: OffsetDateTime = datetime!(2026-03-01 12:00 UTC);

pub fn new_store() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database initialized")
}

pub fn seed_campus(store: &mut Persistence) -> Campus {
    store
        .insert_campus(NewCampus {
            name: String::from("North Campus"),
            latitude: 12.85,
            longitude: 77.66,
        })
        .expect("campus inserted")
}

pub fn passenger_manifest(count: usize) -> Manifest {
    Manifest::Passengers {
        passengers: (0..count)
            .map(|i| Passenger {
                name: format!("rider-{i}"),
                phone: String::from("555-0100"),
                email: format!("rider-{i}@campus.example"),
                organization: String::from("Facilities"),
            })
            .collect(),
    }
}

pub fn cargo_manifest(count: usize) -> Manifest {
    Manifest::Cargo {
        items: (0..count)
            .map(|i| WeightItem {
                name: format!("crate-{i}"),
                weight: 1.5,
            })
            .collect(),
        detail: None,
    }
}

pub fn new_booking(campus_id: i64, vehicle_class: VehicleClass) -> NewBooking {
    let manifest = match vehicle_class {
        VehicleClass::Buggy => passenger_manifest(2),
        VehicleClass::TransportTruck | VehicleClass::Bot => cargo_manifest(1),
    };
    NewBooking {
        requester_id: 7,
        campus_id,
        origin: LatLng::new(12.8501, 77.6631),
        origin_address: String::from("Main Gate"),
        destination: LatLng::new(12.8523, 77.6650),
        destination_address: String::from("Library"),
        vehicle_class,
        schedule: TEST_NOW + time::Duration::minutes(30),
        manifest,
        otp: Otp::new("0042").expect("valid passcode"),
    }
}

pub fn seed_booking(store: &mut Persistence, campus_id: i64) -> Booking {
    store
        .insert_booking(new_booking(campus_id, VehicleClass::Buggy))
        .expect("booking inserted")
}

pub fn seed_vehicle(store: &mut Persistence, identifier: &str) -> Vehicle {
    store
        .insert_vehicle(NewVehicle {
            vehicle_class: VehicleClass::Buggy,
            identifier: identifier.to_string(),
            capacity: Capacity::default(),
            location: LatLng::new(12.850_078_4, 77.663_354_9),
        })
        .expect("vehicle inserted")
}
