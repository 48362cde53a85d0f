// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The record-store boundary consumed by the core engines.
//!
//! The matching engine and lifecycle controller never touch a database
//! directly; they speak to an injected [`TransitStore`]. Every operation
//! that spans a booking/vehicle pair (claim, finalize) is a single method
//! so the implementation can make it one atomic unit — a transaction or a
//! compare-and-set — and report a lost race as `false` rather than a
//! partial write.

use campus_transit_domain::{
    Booking, BookingStatus, Campus, Capacity, LatLng, Manifest, Otp, Vehicle, VehicleClass,
};
use time::OffsetDateTime;

/// Errors raised by a [`TransitStore`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store failed or is unavailable.
    Backend(String),
    /// A stored record could not be encoded or decoded.
    Serialization(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(msg) => write!(f, "Store backend error: {msg}"),
            Self::Serialization(msg) => write!(f, "Store serialization error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Fields for inserting a new booking. The store assigns the id, the
/// `unverified` status, and the record timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub requester_id: i64,
    pub campus_id: i64,
    pub origin: LatLng,
    pub origin_address: String,
    pub destination: LatLng,
    pub destination_address: String,
    pub vehicle_class: VehicleClass,
    pub schedule: OffsetDateTime,
    pub manifest: Manifest,
    pub otp: Otp,
}

/// Fields for inserting a new fleet vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub vehicle_class: VehicleClass,
    pub identifier: String,
    pub capacity: Capacity,
    pub location: LatLng,
}

/// Fields for inserting a new campus.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCampus {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Transactional record store for bookings, vehicles, and campuses.
///
/// Methods returning `bool` are conditional updates: `true` means the
/// expected precondition held and the write was applied; `false` means
/// the precondition no longer held (a concurrent writer got there first)
/// and nothing was changed.
pub trait TransitStore {
    // -- bookings ---------------------------------------------------------

    /// Inserts a booking with status `unverified` and no vehicle.
    fn insert_booking(&mut self, new: NewBooking) -> Result<Booking, StoreError>;

    /// Loads a booking by id.
    fn booking(&mut self, booking_id: i64) -> Result<Option<Booking>, StoreError>;

    /// All bookings for a requester, newest schedule first.
    fn bookings_for_requester(&mut self, requester_id: i64) -> Result<Vec<Booking>, StoreError>;

    /// Terminal bookings for a requester, schedule descending.
    fn past_bookings(&mut self, requester_id: i64) -> Result<Vec<Booking>, StoreError>;

    /// Bookings scheduled at or after `now` for a requester, schedule ascending.
    fn upcoming_bookings(
        &mut self,
        requester_id: i64,
        now: OffsetDateTime,
    ) -> Result<Vec<Booking>, StoreError>;

    /// Sets `status` from an expected current value to a non-terminal
    /// target. Compare-and-set on the current status.
    fn set_status(
        &mut self,
        booking_id: i64,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, StoreError>;

    /// Marks an `unverified` booking as `verified` with `otp_verified`
    /// set, in one conditional update.
    fn mark_verified(&mut self, booking_id: i64) -> Result<bool, StoreError>;

    /// Moves a booking into a terminal status and releases any held
    /// vehicle, as one atomic unit.
    ///
    /// The status write is conditional on `from` still being the current
    /// status; the vehicle release is idempotent (releasing an already
    /// free vehicle is a no-op).
    fn finalize_booking(
        &mut self,
        booking_id: i64,
        from: BookingStatus,
        to: BookingStatus,
        emergency_reason: Option<String>,
    ) -> Result<bool, StoreError>;

    // -- matching ---------------------------------------------------------

    /// Unbooked vehicles of a class, ordered by ascending vehicle id.
    ///
    /// When `min_passenger_capacity` is set, only vehicles that can seat
    /// at least that many riders are returned.
    fn available_vehicles(
        &mut self,
        vehicle_class: VehicleClass,
        min_passenger_capacity: Option<u8>,
    ) -> Result<Vec<Vehicle>, StoreError>;

    /// Atomically claims a vehicle for a booking.
    ///
    /// Applies `vehicle.is_booked = true` and `booking.vehicle_id` as one
    /// unit, only if the vehicle is still unbooked and the booking still
    /// unassigned. Returns `false` if either side lost the race.
    fn claim_vehicle(&mut self, booking_id: i64, vehicle_id: i64) -> Result<bool, StoreError>;

    // -- vehicles ---------------------------------------------------------

    fn insert_vehicle(&mut self, new: NewVehicle) -> Result<Vehicle, StoreError>;

    fn vehicle(&mut self, vehicle_id: i64) -> Result<Option<Vehicle>, StoreError>;

    fn vehicle_by_identifier(&mut self, identifier: &str) -> Result<Option<Vehicle>, StoreError>;

    fn vehicles(&mut self) -> Result<Vec<Vehicle>, StoreError>;

    fn vehicle_for_driver(&mut self, driver_id: i64) -> Result<Option<Vehicle>, StoreError>;

    /// Assigns a driver to a vehicle, conditional on the vehicle having
    /// no driver yet.
    fn assign_driver(&mut self, vehicle_id: i64, driver_id: i64) -> Result<bool, StoreError>;

    /// Updates a vehicle's live location, keyed by identifier. Returns
    /// the updated vehicle, or `None` if the identifier is unknown.
    fn update_vehicle_location(
        &mut self,
        identifier: &str,
        location: LatLng,
    ) -> Result<Option<Vehicle>, StoreError>;

    // -- campuses ---------------------------------------------------------

    fn insert_campus(&mut self, new: NewCampus) -> Result<Campus, StoreError>;

    fn campus(&mut self, campus_id: i64) -> Result<Option<Campus>, StoreError>;

    fn campuses(&mut self) -> Result<Vec<Campus>, StoreError>;

    /// Exact-match lookup used by the duplicate-campus guard.
    fn find_campus(
        &mut self,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<Campus>, StoreError>;
}
