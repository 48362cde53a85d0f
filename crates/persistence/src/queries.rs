// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read paths for bookings, vehicles, and campuses.
//!
//! Schedules are RFC 3339 UTC text, so ordering and range comparisons on
//! the `schedule` column are plain string operations.

use diesel::prelude::*;

use campus_transit_domain::{Booking, BookingStatus, Campus, Vehicle, VehicleClass};
use time::OffsetDateTime;

use crate::data_models::{BookingRow, CampusRow, VehicleRow, format_timestamp};
use crate::diesel_schema::{bookings, campuses, vehicles};
use crate::error::PersistenceError;

fn to_bookings(rows: Vec<BookingRow>) -> Result<Vec<Booking>, PersistenceError> {
    rows.into_iter().map(TryInto::try_into).collect()
}

fn to_vehicles(rows: Vec<VehicleRow>) -> Result<Vec<Vehicle>, PersistenceError> {
    rows.into_iter().map(TryInto::try_into).collect()
}

/// Loads a booking by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Option<Booking>, PersistenceError> {
    bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .first::<BookingRow>(conn)
        .optional()?
        .map(TryInto::try_into)
        .transpose()
}

/// All bookings for a requester, newest schedule first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn bookings_for_requester(
    conn: &mut SqliteConnection,
    requester_id: i64,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows = bookings::table
        .filter(bookings::requester_id.eq(requester_id))
        .order(bookings::schedule.desc())
        .load::<BookingRow>(conn)?;
    to_bookings(rows)
}

/// Terminal bookings for a requester, schedule descending.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn past_bookings(
    conn: &mut SqliteConnection,
    requester_id: i64,
) -> Result<Vec<Booking>, PersistenceError> {
    let terminal = [
        BookingStatus::Completed.as_str(),
        BookingStatus::Cancelled.as_str(),
        BookingStatus::Emergency.as_str(),
    ];
    let rows = bookings::table
        .filter(bookings::requester_id.eq(requester_id))
        .filter(bookings::status.eq_any(terminal))
        .order(bookings::schedule.desc())
        .load::<BookingRow>(conn)?;
    to_bookings(rows)
}

/// Bookings scheduled at or after `now` for a requester, soonest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn upcoming_bookings(
    conn: &mut SqliteConnection,
    requester_id: i64,
    now: OffsetDateTime,
) -> Result<Vec<Booking>, PersistenceError> {
    let cutoff = format_timestamp(now)?;
    let rows = bookings::table
        .filter(bookings::requester_id.eq(requester_id))
        .filter(bookings::schedule.ge(cutoff))
        .order(bookings::schedule.asc())
        .load::<BookingRow>(conn)?;
    to_bookings(rows)
}

/// Unbooked vehicles of a class, ordered by ascending vehicle id.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn available_vehicles(
    conn: &mut SqliteConnection,
    vehicle_class: VehicleClass,
    min_passenger_capacity: Option<u8>,
) -> Result<Vec<Vehicle>, PersistenceError> {
    let mut query = vehicles::table
        .filter(vehicles::vehicle_class.eq(vehicle_class.as_str()))
        .filter(vehicles::is_booked.eq(0))
        .order(vehicles::vehicle_id.asc())
        .into_boxed();
    if let Some(min) = min_passenger_capacity {
        query = query.filter(vehicles::passenger_capacity.ge(i32::from(min)));
    }
    let rows = query.load::<VehicleRow>(conn)?;
    to_vehicles(rows)
}

/// Loads a vehicle by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_vehicle(
    conn: &mut SqliteConnection,
    vehicle_id: i64,
) -> Result<Option<Vehicle>, PersistenceError> {
    vehicles::table
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .first::<VehicleRow>(conn)
        .optional()?
        .map(TryInto::try_into)
        .transpose()
}

/// Loads a vehicle by its fleet identifier.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_vehicle_by_identifier(
    conn: &mut SqliteConnection,
    identifier: &str,
) -> Result<Option<Vehicle>, PersistenceError> {
    vehicles::table
        .filter(vehicles::identifier.eq(identifier))
        .first::<VehicleRow>(conn)
        .optional()?
        .map(TryInto::try_into)
        .transpose()
}

/// The whole fleet, ordered by vehicle id.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_vehicles(conn: &mut SqliteConnection) -> Result<Vec<Vehicle>, PersistenceError> {
    let rows = vehicles::table
        .order(vehicles::vehicle_id.asc())
        .load::<VehicleRow>(conn)?;
    to_vehicles(rows)
}

/// The vehicle a driver currently holds, if any.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn vehicle_for_driver(
    conn: &mut SqliteConnection,
    driver_id: i64,
) -> Result<Option<Vehicle>, PersistenceError> {
    vehicles::table
        .filter(vehicles::driver_id.eq(driver_id))
        .first::<VehicleRow>(conn)
        .optional()?
        .map(TryInto::try_into)
        .transpose()
}

/// Loads a campus by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_campus(
    conn: &mut SqliteConnection,
    campus_id: i64,
) -> Result<Option<Campus>, PersistenceError> {
    Ok(campuses::table
        .filter(campuses::campus_id.eq(campus_id))
        .first::<CampusRow>(conn)
        .optional()?
        .map(Into::into))
}

/// All campuses, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_campuses(conn: &mut SqliteConnection) -> Result<Vec<Campus>, PersistenceError> {
    let rows = campuses::table
        .order(campuses::campus_id.asc())
        .load::<CampusRow>(conn)?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Exact-match campus lookup used by the duplicate guard.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_campus(
    conn: &mut SqliteConnection,
    name: &str,
    latitude: f64,
    longitude: f64,
) -> Result<Option<Campus>, PersistenceError> {
    Ok(campuses::table
        .filter(campuses::name.eq(name))
        .filter(campuses::latitude.eq(latitude))
        .filter(campuses::longitude.eq(longitude))
        .first::<CampusRow>(conn)
        .optional()?
        .map(Into::into))
}
