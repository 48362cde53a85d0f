// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{new_store, seed_vehicle};
use campus_transit::{NewVehicle, TransitStore};
use campus_transit_domain::{Capacity, LatLng, VehicleClass};

#[test]
fn inserted_vehicle_starts_free_and_driverless() {
    let mut store = new_store();
    let vehicle = seed_vehicle(&mut store, "BUG-01");

    assert!(!vehicle.is_booked);
    assert!(vehicle.driver_id.is_none());
    assert_eq!(vehicle.vehicle_class, VehicleClass::Buggy);
    assert_eq!(vehicle.capacity, Capacity::default());
}

#[test]
fn identifier_uniqueness_is_enforced_by_the_schema() {
    let mut store = new_store();
    seed_vehicle(&mut store, "BUG-01");

    let duplicate = store.insert_vehicle(NewVehicle {
        vehicle_class: VehicleClass::Buggy,
        identifier: String::from("BUG-01"),
        capacity: Capacity::default(),
        location: LatLng::new(12.85, 77.66),
    });
    assert!(duplicate.is_err());
}

#[test]
fn identifier_lookup_round_trips() {
    let mut store = new_store();
    let vehicle = seed_vehicle(&mut store, "BUG-01");

    let found = store
        .vehicle_by_identifier("BUG-01")
        .expect("lookup succeeds")
        .expect("vehicle exists");
    assert_eq!(found.vehicle_id, vehicle.vehicle_id);

    assert!(
        store
            .vehicle_by_identifier("BUG-99")
            .expect("lookup succeeds")
            .is_none()
    );
}

#[test]
fn driver_assignment_is_conditional_on_an_empty_seat() {
    let mut store = new_store();
    let vehicle = seed_vehicle(&mut store, "BUG-01");

    assert!(
        store
            .assign_driver(vehicle.vehicle_id, 501)
            .expect("update succeeds")
    );
    assert!(
        !store
            .assign_driver(vehicle.vehicle_id, 502)
            .expect("update returns")
    );

    let held = store
        .vehicle_for_driver(501)
        .expect("lookup succeeds")
        .expect("vehicle exists");
    assert_eq!(held.vehicle_id, vehicle.vehicle_id);
    assert!(store.vehicle_for_driver(502).expect("lookup succeeds").is_none());
}

#[test]
fn location_update_is_keyed_by_identifier() {
    let mut store = new_store();
    seed_vehicle(&mut store, "BUG-01");
    let reported = LatLng::new(12.8519, 77.6644);

    let updated = store
        .update_vehicle_location("BUG-01", reported)
        .expect("update succeeds")
        .expect("vehicle exists");
    assert_eq!(updated.location, reported);

    assert!(
        store
            .update_vehicle_location("BUG-99", reported)
            .expect("update returns")
            .is_none()
    );
}

#[test]
fn availability_filters_on_class_capacity_and_claim_flag() {
    let mut store = new_store();

    let small = store
        .insert_vehicle(NewVehicle {
            vehicle_class: VehicleClass::Buggy,
            identifier: String::from("BUG-01"),
            capacity: Capacity::new(2, 1).expect("valid capacity"),
            location: LatLng::new(12.85, 77.66),
        })
        .expect("vehicle inserted");
    let roomy = store
        .insert_vehicle(NewVehicle {
            vehicle_class: VehicleClass::Buggy,
            identifier: String::from("BUG-02"),
            capacity: Capacity::new(3, 1).expect("valid capacity"),
            location: LatLng::new(12.85, 77.66),
        })
        .expect("vehicle inserted");
    store
        .insert_vehicle(NewVehicle {
            vehicle_class: VehicleClass::Bot,
            identifier: String::from("BOT-01"),
            capacity: Capacity::new(1, 1).expect("valid capacity"),
            location: LatLng::new(12.85, 77.66),
        })
        .expect("vehicle inserted");

    let buggies = store
        .available_vehicles(VehicleClass::Buggy, None)
        .expect("availability listed");
    let ids: Vec<i64> = buggies.iter().map(|v| v.vehicle_id).collect();
    assert_eq!(ids, vec![small.vehicle_id, roomy.vehicle_id]);

    let three_seaters = store
        .available_vehicles(VehicleClass::Buggy, Some(3))
        .expect("availability listed");
    let ids: Vec<i64> = three_seaters.iter().map(|v| v.vehicle_id).collect();
    assert_eq!(ids, vec![roomy.vehicle_id]);
}
