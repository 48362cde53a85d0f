// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helpers: an in-memory record store and notifier doubles.

use crate::store::{NewBooking, NewCampus, NewVehicle, StoreError, TransitStore};
use crate::{BookingDraft, DispatchNotifier, NotifyError};
use campus_transit_domain::{
    Booking, BookingStatus, Campus, LatLng, Manifest, Passenger, Vehicle, VehicleClass, WeightItem,
};
use std::cell::RefCell;
use time::OffsetDateTime;
use time::macros::datetime;

pub const TEST_NOW: OffsetDateTime = datetime!(2026-03-01 12:00 UTC);

const TEST_STAMP: &str = "2026-03-01T12:00:00Z";

/// In-memory `TransitStore` with the same conditional-update semantics
/// as the SQLite implementation.
#[derive(Default)]
pub struct MemoryStore {
    bookings: Vec<Booking>,
    vehicles: Vec<Vehicle>,
    campuses: Vec<Campus>,
    contested_claims: u32,
    rival_assignment: Option<(i64, i64)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn booking_ref(&self, booking_id: i64) -> &Booking {
        self.bookings
            .iter()
            .find(|b| b.booking_id == booking_id)
            .expect("booking exists")
    }

    pub fn vehicle_ref(&self, vehicle_id: i64) -> &Vehicle {
        self.vehicles
            .iter()
            .find(|v| v.vehicle_id == vehicle_id)
            .expect("vehicle exists")
    }

    /// Forces a vehicle into the booked state, simulating a concurrent
    /// claim landing between a read and a write.
    pub fn force_book_vehicle(&mut self, vehicle_id: i64) {
        for vehicle in &mut self.vehicles {
            if vehicle.vehicle_id == vehicle_id {
                vehicle.is_booked = true;
            }
        }
    }

    /// Makes the next `count` claims report a lost race. Each lost claim
    /// books the contested vehicle, as if a rival dispatcher won it for
    /// another booking.
    pub fn contest_next_claims(&mut self, count: u32) {
        self.contested_claims += count;
    }

    /// Makes the next claim report a lost race while the given rival
    /// assignment lands, as if another dispatcher assigned the same
    /// booking concurrently.
    pub fn contest_next_claim_with_rival(&mut self, booking_id: i64, vehicle_id: i64) {
        self.contested_claims += 1;
        self.rival_assignment = Some((booking_id, vehicle_id));
    }

    fn apply_claim(&mut self, booking_id: i64, vehicle_id: i64) {
        for vehicle in &mut self.vehicles {
            if vehicle.vehicle_id == vehicle_id {
                vehicle.is_booked = true;
            }
        }
        for booking in &mut self.bookings {
            if booking.booking_id == booking_id {
                booking.vehicle_id = Some(vehicle_id);
            }
        }
    }
}

impl TransitStore for MemoryStore {
    fn insert_booking(&mut self, new: NewBooking) -> Result<Booking, StoreError> {
        let booking = Booking {
            booking_id: i64::try_from(self.bookings.len()).unwrap() + 1,
            requester_id: new.requester_id,
            campus_id: new.campus_id,
            origin: new.origin,
            origin_address: new.origin_address,
            destination: new.destination,
            destination_address: new.destination_address,
            vehicle_class: new.vehicle_class,
            vehicle_id: None,
            schedule: new.schedule,
            status: BookingStatus::Unverified,
            otp: new.otp,
            otp_verified: false,
            manifest: new.manifest,
            emergency_reason: None,
            created_at: TEST_STAMP.to_string(),
            updated_at: TEST_STAMP.to_string(),
        };
        self.bookings.push(booking.clone());
        Ok(booking)
    }

    fn booking(&mut self, booking_id: i64) -> Result<Option<Booking>, StoreError> {
        Ok(self
            .bookings
            .iter()
            .find(|b| b.booking_id == booking_id)
            .cloned())
    }

    fn bookings_for_requester(&mut self, requester_id: i64) -> Result<Vec<Booking>, StoreError> {
        let mut found: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.requester_id == requester_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.schedule.cmp(&a.schedule));
        Ok(found)
    }

    fn past_bookings(&mut self, requester_id: i64) -> Result<Vec<Booking>, StoreError> {
        let mut found: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.requester_id == requester_id && b.status.is_terminal())
            .cloned()
            .collect();
        found.sort_by(|a, b| b.schedule.cmp(&a.schedule));
        Ok(found)
    }

    fn upcoming_bookings(
        &mut self,
        requester_id: i64,
        now: OffsetDateTime,
    ) -> Result<Vec<Booking>, StoreError> {
        let mut found: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.requester_id == requester_id && b.schedule >= now)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.schedule.cmp(&b.schedule));
        Ok(found)
    }

    fn set_status(
        &mut self,
        booking_id: i64,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, StoreError> {
        for booking in &mut self.bookings {
            if booking.booking_id == booking_id && booking.status == from {
                booking.status = to;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn mark_verified(&mut self, booking_id: i64) -> Result<bool, StoreError> {
        for booking in &mut self.bookings {
            if booking.booking_id == booking_id && booking.status == BookingStatus::Unverified {
                booking.status = BookingStatus::Verified;
                booking.otp_verified = true;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn finalize_booking(
        &mut self,
        booking_id: i64,
        from: BookingStatus,
        to: BookingStatus,
        emergency_reason: Option<String>,
    ) -> Result<bool, StoreError> {
        let mut released: Option<i64> = None;
        let mut applied = false;
        for booking in &mut self.bookings {
            if booking.booking_id == booking_id && booking.status == from {
                booking.status = to;
                if emergency_reason.is_some() {
                    booking.emergency_reason = emergency_reason.clone();
                }
                released = booking.vehicle_id;
                applied = true;
            }
        }
        if let Some(vehicle_id) = released {
            for vehicle in &mut self.vehicles {
                if vehicle.vehicle_id == vehicle_id {
                    vehicle.is_booked = false;
                }
            }
        }
        Ok(applied)
    }

    fn available_vehicles(
        &mut self,
        vehicle_class: VehicleClass,
        min_passenger_capacity: Option<u8>,
    ) -> Result<Vec<Vehicle>, StoreError> {
        let mut found: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| {
                v.vehicle_class == vehicle_class
                    && !v.is_booked
                    && min_passenger_capacity.is_none_or(|min| v.capacity.passengers() >= min)
            })
            .cloned()
            .collect();
        found.sort_by_key(|v| v.vehicle_id);
        Ok(found)
    }

    fn claim_vehicle(&mut self, booking_id: i64, vehicle_id: i64) -> Result<bool, StoreError> {
        if self.contested_claims > 0 {
            self.contested_claims -= 1;
            if let Some((rival_booking, rival_vehicle)) = self.rival_assignment.take() {
                self.apply_claim(rival_booking, rival_vehicle);
            } else {
                self.force_book_vehicle(vehicle_id);
            }
            return Ok(false);
        }
        let vehicle_free = self
            .vehicles
            .iter()
            .any(|v| v.vehicle_id == vehicle_id && !v.is_booked);
        let booking_unassigned = self
            .bookings
            .iter()
            .any(|b| b.booking_id == booking_id && b.vehicle_id.is_none());
        if !(vehicle_free && booking_unassigned) {
            return Ok(false);
        }
        self.apply_claim(booking_id, vehicle_id);
        Ok(true)
    }

    fn insert_vehicle(&mut self, new: NewVehicle) -> Result<Vehicle, StoreError> {
        let vehicle = Vehicle {
            vehicle_id: i64::try_from(self.vehicles.len()).unwrap() + 1,
            vehicle_class: new.vehicle_class,
            identifier: new.identifier,
            capacity: new.capacity,
            location: new.location,
            driver_id: None,
            is_booked: false,
            created_at: TEST_STAMP.to_string(),
            updated_at: TEST_STAMP.to_string(),
        };
        self.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    fn vehicle(&mut self, vehicle_id: i64) -> Result<Option<Vehicle>, StoreError> {
        Ok(self
            .vehicles
            .iter()
            .find(|v| v.vehicle_id == vehicle_id)
            .cloned())
    }

    fn vehicle_by_identifier(&mut self, identifier: &str) -> Result<Option<Vehicle>, StoreError> {
        Ok(self
            .vehicles
            .iter()
            .find(|v| v.identifier == identifier)
            .cloned())
    }

    fn vehicles(&mut self) -> Result<Vec<Vehicle>, StoreError> {
        Ok(self.vehicles.clone())
    }

    fn vehicle_for_driver(&mut self, driver_id: i64) -> Result<Option<Vehicle>, StoreError> {
        Ok(self
            .vehicles
            .iter()
            .find(|v| v.driver_id == Some(driver_id))
            .cloned())
    }

    fn assign_driver(&mut self, vehicle_id: i64, driver_id: i64) -> Result<bool, StoreError> {
        for vehicle in &mut self.vehicles {
            if vehicle.vehicle_id == vehicle_id && vehicle.driver_id.is_none() {
                vehicle.driver_id = Some(driver_id);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn update_vehicle_location(
        &mut self,
        identifier: &str,
        location: LatLng,
    ) -> Result<Option<Vehicle>, StoreError> {
        for vehicle in &mut self.vehicles {
            if vehicle.identifier == identifier {
                vehicle.location = location;
                return Ok(Some(vehicle.clone()));
            }
        }
        Ok(None)
    }

    fn insert_campus(&mut self, new: NewCampus) -> Result<Campus, StoreError> {
        let campus = Campus {
            campus_id: i64::try_from(self.campuses.len()).unwrap() + 1,
            name: new.name,
            latitude: new.latitude,
            longitude: new.longitude,
        };
        self.campuses.push(campus.clone());
        Ok(campus)
    }

    fn campus(&mut self, campus_id: i64) -> Result<Option<Campus>, StoreError> {
        Ok(self
            .campuses
            .iter()
            .find(|c| c.campus_id == campus_id)
            .cloned())
    }

    fn campuses(&mut self) -> Result<Vec<Campus>, StoreError> {
        Ok(self.campuses.clone())
    }

    fn find_campus(
        &mut self,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<Campus>, StoreError> {
        Ok(self
            .campuses
            .iter()
            .find(|c| {
                c.name == name
                    && (c.latitude - latitude).abs() < f64::EPSILON
                    && (c.longitude - longitude).abs() < f64::EPSILON
            })
            .cloned())
    }
}

/// One observed notifier-gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyCall {
    Immediate {
        booking_id: i64,
    },
    Scheduled {
        booking_id: i64,
        requester_id: i64,
        pickup_at: OffsetDateTime,
    },
}

/// Notifier double that records every call.
#[derive(Default)]
pub struct RecordingNotifier {
    pub calls: RefCell<Vec<NotifyCall>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<NotifyCall> {
        self.calls.borrow().clone()
    }
}

impl DispatchNotifier for RecordingNotifier {
    fn notify_immediate(&self, booking_id: i64) -> Result<(), NotifyError> {
        self.calls
            .borrow_mut()
            .push(NotifyCall::Immediate { booking_id });
        Ok(())
    }

    fn notify_scheduled(
        &self,
        booking_id: i64,
        requester_id: i64,
        pickup_at: OffsetDateTime,
    ) -> Result<(), NotifyError> {
        self.calls.borrow_mut().push(NotifyCall::Scheduled {
            booking_id,
            requester_id,
            pickup_at,
        });
        Ok(())
    }
}

/// Notifier double whose gateway is always down.
pub struct FailingNotifier;

impl DispatchNotifier for FailingNotifier {
    fn notify_immediate(&self, _booking_id: i64) -> Result<(), NotifyError> {
        Err(NotifyError::Unavailable(String::from("gateway down")))
    }

    fn notify_scheduled(
        &self,
        _booking_id: i64,
        _requester_id: i64,
        _pickup_at: OffsetDateTime,
    ) -> Result<(), NotifyError> {
        Err(NotifyError::Unavailable(String::from("gateway down")))
    }
}

pub fn seed_campus(store: &mut MemoryStore) -> Campus {
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

/// A valid draft scheduled 90 seconds out (immediate dispatch path).
pub fn draft(campus_id: i64, vehicle_class: VehicleClass) -> BookingDraft {
    let manifest = match vehicle_class {
        VehicleClass::Buggy => passenger_manifest(2),
        VehicleClass::TransportTruck | VehicleClass::Bot => cargo_manifest(1),
    };
    BookingDraft {
        requester_id: 7,
        campus_id,
        origin: LatLng::new(12.8501, 77.6631),
        origin_address: String::from("Main Gate"),
        destination: LatLng::new(12.8523, 77.6650),
        destination_address: String::from("Library"),
        vehicle_class,
        schedule: TEST_NOW + time::Duration::seconds(90),
        manifest,
    }
}
