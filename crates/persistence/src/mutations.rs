// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write paths for bookings, vehicles, and campuses.
//!
//! Conditional updates return `bool`: `true` when the expected
//! precondition still held and the write landed, `false` when a
//! concurrent writer got there first. The claim and finalize paths span
//! a booking/vehicle pair and therefore run inside a transaction.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use tracing::{debug, info};

use campus_transit::{NewBooking, NewCampus, NewVehicle};
use campus_transit_domain::{Booking, BookingStatus, Campus, LatLng, Vehicle};

use crate::data_models::{format_timestamp, manifest_to_json};
use crate::diesel_schema::{bookings, campuses, vehicles};
use crate::error::PersistenceError;
use crate::{queries, sqlite};

/// RFC 3339 UTC "now", evaluated by `SQLite`.
const NOW_UTC: &str = "STRFTIME('%Y-%m-%dT%H:%M:%SZ', 'now')";

/// Inserts a booking with status `unverified` and no vehicle.
///
/// # Errors
///
/// Returns an error if the insert fails or the row cannot be read back.
pub fn insert_booking(
    conn: &mut SqliteConnection,
    new: &NewBooking,
) -> Result<Booking, PersistenceError> {
    let schedule = format_timestamp(new.schedule)?;
    let manifest_json = manifest_to_json(&new.manifest)?;

    diesel::insert_into(bookings::table)
        .values((
            bookings::requester_id.eq(new.requester_id),
            bookings::campus_id.eq(new.campus_id),
            bookings::origin_lat.eq(new.origin.lat),
            bookings::origin_lng.eq(new.origin.lng),
            bookings::origin_address.eq(&new.origin_address),
            bookings::destination_lat.eq(new.destination.lat),
            bookings::destination_lng.eq(new.destination.lng),
            bookings::destination_address.eq(&new.destination_address),
            bookings::vehicle_class.eq(new.vehicle_class.as_str()),
            bookings::schedule.eq(&schedule),
            bookings::status.eq(BookingStatus::Unverified.as_str()),
            bookings::otp.eq(new.otp.value()),
            bookings::manifest_json.eq(&manifest_json),
        ))
        .execute(conn)?;

    let booking_id: i64 = sqlite::get_last_insert_rowid(conn)?;
    info!(booking_id, "booking row inserted");

    queries::get_booking(conn, booking_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("booking {booking_id} after insert")))
}

/// Compare-and-set on the booking status column.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn set_status(
    conn: &mut SqliteConnection,
    booking_id: i64,
    from: BookingStatus,
    to: BookingStatus,
) -> Result<bool, PersistenceError> {
    let updated = diesel::update(bookings::table)
        .filter(bookings::booking_id.eq(booking_id))
        .filter(bookings::status.eq(from.as_str()))
        .set((
            bookings::status.eq(to.as_str()),
            bookings::updated_at.eq(sql::<Text>(NOW_UTC)),
        ))
        .execute(conn)?;
    Ok(updated > 0)
}

/// Marks an `unverified` booking as `verified` with `otp_verified` set.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn mark_verified(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<bool, PersistenceError> {
    let updated = diesel::update(bookings::table)
        .filter(bookings::booking_id.eq(booking_id))
        .filter(bookings::status.eq(BookingStatus::Unverified.as_str()))
        .set((
            bookings::status.eq(BookingStatus::Verified.as_str()),
            bookings::otp_verified.eq(1),
            bookings::updated_at.eq(sql::<Text>(NOW_UTC)),
        ))
        .execute(conn)?;
    Ok(updated > 0)
}

/// Moves a booking into a terminal status and releases any held vehicle,
/// in one transaction.
///
/// The status write is conditional on `from` still being current; the
/// vehicle release is idempotent.
///
/// # Errors
///
/// Returns an error if the transaction fails.
pub fn finalize_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
    from: BookingStatus,
    to: BookingStatus,
    emergency_reason: Option<&str>,
) -> Result<bool, PersistenceError> {
    conn.transaction::<bool, PersistenceError, _>(|conn| {
        let updated = diesel::update(bookings::table)
            .filter(bookings::booking_id.eq(booking_id))
            .filter(bookings::status.eq(from.as_str()))
            .set((
                bookings::status.eq(to.as_str()),
                bookings::updated_at.eq(sql::<Text>(NOW_UTC)),
            ))
            .execute(conn)?;
        if updated == 0 {
            return Ok(false);
        }

        if let Some(reason) = emergency_reason {
            diesel::update(bookings::table)
                .filter(bookings::booking_id.eq(booking_id))
                .set(bookings::emergency_reason.eq(reason))
                .execute(conn)?;
        }

        let held: Option<i64> = bookings::table
            .filter(bookings::booking_id.eq(booking_id))
            .select(bookings::vehicle_id)
            .first(conn)?;
        if let Some(vehicle_id) = held {
            diesel::update(vehicles::table)
                .filter(vehicles::vehicle_id.eq(vehicle_id))
                .set((
                    vehicles::is_booked.eq(0),
                    vehicles::updated_at.eq(sql::<Text>(NOW_UTC)),
                ))
                .execute(conn)?;
            info!(booking_id, vehicle_id, "vehicle released");
        }

        Ok(true)
    })
}

/// Atomically claims a vehicle for a booking.
///
/// The vehicle flag and the booking assignment are written in one
/// transaction; if either side lost a race the transaction rolls back
/// and `false` is returned.
///
/// # Errors
///
/// Returns an error if the transaction fails for any reason other than
/// a lost claim race.
pub fn claim_vehicle(
    conn: &mut SqliteConnection,
    booking_id: i64,
    vehicle_id: i64,
) -> Result<bool, PersistenceError> {
    let outcome = conn.transaction::<bool, diesel::result::Error, _>(|conn| {
        let vehicle_claimed = diesel::update(vehicles::table)
            .filter(vehicles::vehicle_id.eq(vehicle_id))
            .filter(vehicles::is_booked.eq(0))
            .set((
                vehicles::is_booked.eq(1),
                vehicles::updated_at.eq(sql::<Text>(NOW_UTC)),
            ))
            .execute(conn)?;
        if vehicle_claimed == 0 {
            return Err(diesel::result::Error::RollbackTransaction);
        }

        let booking_assigned = diesel::update(bookings::table)
            .filter(bookings::booking_id.eq(booking_id))
            .filter(bookings::vehicle_id.is_null())
            .set((
                bookings::vehicle_id.eq(vehicle_id),
                bookings::updated_at.eq(sql::<Text>(NOW_UTC)),
            ))
            .execute(conn)?;
        if booking_assigned == 0 {
            return Err(diesel::result::Error::RollbackTransaction);
        }

        Ok(true)
    });

    match outcome {
        Ok(applied) => {
            info!(booking_id, vehicle_id, "vehicle claimed");
            Ok(applied)
        }
        Err(diesel::result::Error::RollbackTransaction) => {
            debug!(booking_id, vehicle_id, "claim lost to a concurrent writer");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Inserts a fleet vehicle.
///
/// # Errors
///
/// Returns an error if the insert fails or the row cannot be read back.
pub fn insert_vehicle(
    conn: &mut SqliteConnection,
    new: &NewVehicle,
) -> Result<Vehicle, PersistenceError> {
    diesel::insert_into(vehicles::table)
        .values((
            vehicles::vehicle_class.eq(new.vehicle_class.as_str()),
            vehicles::identifier.eq(&new.identifier),
            vehicles::passenger_capacity.eq(i32::from(new.capacity.passengers())),
            vehicles::weight_capacity.eq(i32::from(new.capacity.weight())),
            vehicles::latitude.eq(new.location.lat),
            vehicles::longitude.eq(new.location.lng),
        ))
        .execute(conn)?;

    let vehicle_id: i64 = sqlite::get_last_insert_rowid(conn)?;
    info!(vehicle_id, identifier = %new.identifier, "vehicle row inserted");

    queries::get_vehicle(conn, vehicle_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("vehicle {vehicle_id} after insert")))
}

/// Assigns a driver, conditional on the driver seat still being empty.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn assign_driver(
    conn: &mut SqliteConnection,
    vehicle_id: i64,
    driver_id: i64,
) -> Result<bool, PersistenceError> {
    let updated = diesel::update(vehicles::table)
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .filter(vehicles::driver_id.is_null())
        .set((
            vehicles::driver_id.eq(driver_id),
            vehicles::updated_at.eq(sql::<Text>(NOW_UTC)),
        ))
        .execute(conn)?;
    Ok(updated > 0)
}

/// Updates a vehicle's live location, keyed by fleet identifier.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_vehicle_location(
    conn: &mut SqliteConnection,
    identifier: &str,
    location: LatLng,
) -> Result<Option<Vehicle>, PersistenceError> {
    let updated = diesel::update(vehicles::table)
        .filter(vehicles::identifier.eq(identifier))
        .set((
            vehicles::latitude.eq(location.lat),
            vehicles::longitude.eq(location.lng),
            vehicles::updated_at.eq(sql::<Text>(NOW_UTC)),
        ))
        .execute(conn)?;
    if updated == 0 {
        return Ok(None);
    }
    queries::get_vehicle_by_identifier(conn, identifier)
}

/// Inserts a campus.
///
/// # Errors
///
/// Returns an error if the insert fails or the row cannot be read back.
pub fn insert_campus(
    conn: &mut SqliteConnection,
    new: &NewCampus,
) -> Result<Campus, PersistenceError> {
    diesel::insert_into(campuses::table)
        .values((
            campuses::name.eq(&new.name),
            campuses::latitude.eq(new.latitude),
            campuses::longitude.eq(new.longitude),
        ))
        .execute(conn)?;

    let campus_id: i64 = sqlite::get_last_insert_rowid(conn)?;
    info!(campus_id, name = %new.name, "campus row inserted");

    queries::get_campus(conn, campus_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("campus {campus_id} after insert")))
}
