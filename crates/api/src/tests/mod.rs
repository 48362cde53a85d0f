// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use campus_transit::{DispatchNotifier, NotifyError};
use campus_transit_domain::{Campus, Manifest, Passenger, Vehicle};
use campus_transit_persistence::Persistence;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::request_response::{
    CapacityRequest, CreateBookingRequest, CreateCampusRequest, CreateVehicleRequest,
};

pub const TEST_NOW: OffsetDateTime = datetime!(2026-03-01 12:00 UTC);

/// Notifier gateway stand-in; the dispatch decision itself is covered by
/// the core tests.
pub struct SilentNotifier;

impl DispatchNotifier for SilentNotifier {
    fn notify_immediate(&self, _booking_id: i64) -> Result<(), NotifyError> {
        Ok(())
    }

    fn notify_scheduled(
        &self,
        _booking_id: i64,
        _requester_id: i64,
        _pickup_at: OffsetDateTime,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}

pub fn new_store() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database initialized")
}

pub fn seed_campus(store: &mut Persistence) -> Campus {
    crate::create_campus(
        store,
        CreateCampusRequest {
            name: Some(String::from("North Campus")),
            latitude: Some(12.85),
            longitude: Some(77.66),
        },
    )
    .expect("campus created")
    .campus
}

pub fn seed_vehicle(store: &mut Persistence, identifier: &str) -> Vehicle {
    crate::create_vehicle(
        store,
        CreateVehicleRequest {
            vehicle_class: Some(String::from("Buggy")),
            identifier: Some(identifier.to_string()),
            capacity: Some(CapacityRequest {
                passengers: 3,
                weight: 3,
            }),
        },
    )
    .expect("vehicle created")
    .vehicle
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

pub fn rfc3339(instant: OffsetDateTime) -> String {
    instant
        .format(&time::format_description::well_known::Rfc3339)
        .expect("formattable instant")
}

/// A fully populated buggy request 90 seconds out; tests knock out the
/// field under scrutiny.
pub fn booking_request(campus_id: i64) -> CreateBookingRequest {
    CreateBookingRequest {
        requester_id: Some(7),
        campus_id: Some(campus_id),
        origin: Some(campus_transit_domain::LatLng::new(12.8501, 77.6631)),
        origin_address: Some(String::from("Main Gate")),
        destination: Some(campus_transit_domain::LatLng::new(12.8523, 77.6650)),
        destination_address: Some(String::from("Library")),
        vehicle_class: Some(String::from("Buggy")),
        schedule: Some(rfc3339(TEST_NOW + Duration::seconds(90))),
        manifest: Some(passenger_manifest(2)),
    }
}
