// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence layer for Campus Transit.
//!
//! Built on Diesel with embedded migrations. The [`Persistence`] adapter
//! implements the core crate's `TransitStore` boundary: single-row reads
//! and writes go straight through, while the claim and finalize paths
//! run inside `SQLite` transactions so the booking/vehicle pair can
//! never be half-written.
//!
//! In-memory databases (used by tests) receive a unique name from an
//! atomic counter, so parallel tests never share state.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use campus_transit::{
    NewBooking, NewCampus, NewVehicle, StoreError, TransitStore,
};
use campus_transit_domain::{Booking, BookingStatus, Campus, LatLng, Vehicle, VehicleClass};
use time::OffsetDateTime;

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite`-backed record store for bookings, vehicles, and campuses.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_transit_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required to ensure referential
    /// integrity constraints are enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }
}

impl TransitStore for Persistence {
    fn insert_booking(&mut self, new: NewBooking) -> Result<Booking, StoreError> {
        Ok(mutations::insert_booking(&mut self.conn, &new)?)
    }

    fn booking(&mut self, booking_id: i64) -> Result<Option<Booking>, StoreError> {
        Ok(queries::get_booking(&mut self.conn, booking_id)?)
    }

    fn bookings_for_requester(&mut self, requester_id: i64) -> Result<Vec<Booking>, StoreError> {
        Ok(queries::bookings_for_requester(&mut self.conn, requester_id)?)
    }

    fn past_bookings(&mut self, requester_id: i64) -> Result<Vec<Booking>, StoreError> {
        Ok(queries::past_bookings(&mut self.conn, requester_id)?)
    }

    fn upcoming_bookings(
        &mut self,
        requester_id: i64,
        now: OffsetDateTime,
    ) -> Result<Vec<Booking>, StoreError> {
        Ok(queries::upcoming_bookings(&mut self.conn, requester_id, now)?)
    }

    fn set_status(
        &mut self,
        booking_id: i64,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, StoreError> {
        Ok(mutations::set_status(&mut self.conn, booking_id, from, to)?)
    }

    fn mark_verified(&mut self, booking_id: i64) -> Result<bool, StoreError> {
        Ok(mutations::mark_verified(&mut self.conn, booking_id)?)
    }

    fn finalize_booking(
        &mut self,
        booking_id: i64,
        from: BookingStatus,
        to: BookingStatus,
        emergency_reason: Option<String>,
    ) -> Result<bool, StoreError> {
        Ok(mutations::finalize_booking(
            &mut self.conn,
            booking_id,
            from,
            to,
            emergency_reason.as_deref(),
        )?)
    }

    fn available_vehicles(
        &mut self,
        vehicle_class: VehicleClass,
        min_passenger_capacity: Option<u8>,
    ) -> Result<Vec<Vehicle>, StoreError> {
        Ok(queries::available_vehicles(
            &mut self.conn,
            vehicle_class,
            min_passenger_capacity,
        )?)
    }

    fn claim_vehicle(&mut self, booking_id: i64, vehicle_id: i64) -> Result<bool, StoreError> {
        Ok(mutations::claim_vehicle(
            &mut self.conn,
            booking_id,
            vehicle_id,
        )?)
    }

    fn insert_vehicle(&mut self, new: NewVehicle) -> Result<Vehicle, StoreError> {
        Ok(mutations::insert_vehicle(&mut self.conn, &new)?)
    }

    fn vehicle(&mut self, vehicle_id: i64) -> Result<Option<Vehicle>, StoreError> {
        Ok(queries::get_vehicle(&mut self.conn, vehicle_id)?)
    }

    fn vehicle_by_identifier(&mut self, identifier: &str) -> Result<Option<Vehicle>, StoreError> {
        Ok(queries::get_vehicle_by_identifier(
            &mut self.conn,
            identifier,
        )?)
    }

    fn vehicles(&mut self) -> Result<Vec<Vehicle>, StoreError> {
        Ok(queries::list_vehicles(&mut self.conn)?)
    }

    fn vehicle_for_driver(&mut self, driver_id: i64) -> Result<Option<Vehicle>, StoreError> {
        Ok(queries::vehicle_for_driver(&mut self.conn, driver_id)?)
    }

    fn assign_driver(&mut self, vehicle_id: i64, driver_id: i64) -> Result<bool, StoreError> {
        Ok(mutations::assign_driver(
            &mut self.conn,
            vehicle_id,
            driver_id,
        )?)
    }

    fn update_vehicle_location(
        &mut self,
        identifier: &str,
        location: LatLng,
    ) -> Result<Option<Vehicle>, StoreError> {
        Ok(mutations::update_vehicle_location(
            &mut self.conn,
            identifier,
            location,
        )?)
    }

    fn insert_campus(&mut self, new: NewCampus) -> Result<Campus, StoreError> {
        Ok(mutations::insert_campus(&mut self.conn, &new)?)
    }

    fn campus(&mut self, campus_id: i64) -> Result<Option<Campus>, StoreError> {
        Ok(queries::get_campus(&mut self.conn, campus_id)?)
    }

    fn campuses(&mut self) -> Result<Vec<Campus>, StoreError> {
        Ok(queries::list_campuses(&mut self.conn)?)
    }

    fn find_campus(
        &mut self,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<Campus>, StoreError> {
        Ok(queries::find_campus(
            &mut self.conn,
            name,
            latitude,
            longitude,
        )?)
    }
}
