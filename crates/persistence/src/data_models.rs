// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and conversions between database rows and domain values.
//!
//! Enum-like columns (`vehicle_class`, `status`) are stored as their wire
//! strings, the manifest as a JSON document, and timestamps as RFC 3339
//! UTC text. Conversion failures surface as [`PersistenceError::CorruptRecord`]
//! rather than panics: a bad row is a data problem, not a programming error.

use diesel::prelude::*;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use campus_transit_domain::{
    Booking, BookingStatus, Campus, Capacity, LatLng, Manifest, Otp, Vehicle, VehicleClass,
};

use crate::error::PersistenceError;

/// A row from the `bookings` table.
#[derive(Debug, Clone, Queryable)]
pub struct BookingRow {
    pub booking_id: i64,
    pub requester_id: i64,
    pub campus_id: i64,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub origin_address: String,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub destination_address: String,
    pub vehicle_class: String,
    pub vehicle_id: Option<i64>,
    pub schedule: String,
    pub status: String,
    pub otp: String,
    pub otp_verified: i32,
    pub manifest_json: String,
    pub emergency_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A row from the `vehicles` table.
#[derive(Debug, Clone, Queryable)]
pub struct VehicleRow {
    pub vehicle_id: i64,
    pub vehicle_class: String,
    pub identifier: String,
    pub passenger_capacity: i32,
    pub weight_capacity: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub driver_id: Option<i64>,
    pub is_booked: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// A row from the `campuses` table.
#[derive(Debug, Clone, Queryable)]
pub struct CampusRow {
    pub campus_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Formats a timestamp as RFC 3339 UTC text for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Serializes a manifest to its JSON document form.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn manifest_to_json(manifest: &Manifest) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(manifest)?)
}

impl TryFrom<BookingRow> for Booking {
    type Error = PersistenceError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let schedule = OffsetDateTime::parse(&row.schedule, &Rfc3339)
            .map_err(|e| PersistenceError::CorruptRecord(format!("bad schedule: {e}")))?;
        let vehicle_class: VehicleClass = row.vehicle_class.parse()?;
        let status: BookingStatus = row.status.parse()?;
        let otp = Otp::new(&row.otp)?;
        let manifest: Manifest = serde_json::from_str(&row.manifest_json)?;

        Ok(Self {
            booking_id: row.booking_id,
            requester_id: row.requester_id,
            campus_id: row.campus_id,
            origin: LatLng::new(row.origin_lat, row.origin_lng),
            origin_address: row.origin_address,
            destination: LatLng::new(row.destination_lat, row.destination_lng),
            destination_address: row.destination_address,
            vehicle_class,
            vehicle_id: row.vehicle_id,
            schedule,
            status,
            otp,
            otp_verified: row.otp_verified != 0,
            manifest,
            emergency_reason: row.emergency_reason,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = PersistenceError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let vehicle_class: VehicleClass = row.vehicle_class.parse()?;
        let passengers = u8::try_from(row.passenger_capacity)
            .map_err(|e| PersistenceError::CorruptRecord(format!("bad passenger capacity: {e}")))?;
        let weight = u8::try_from(row.weight_capacity)
            .map_err(|e| PersistenceError::CorruptRecord(format!("bad weight capacity: {e}")))?;
        let capacity = Capacity::new(passengers, weight)?;

        Ok(Self {
            vehicle_id: row.vehicle_id,
            vehicle_class,
            identifier: row.identifier,
            capacity,
            location: LatLng::new(row.latitude, row.longitude),
            driver_id: row.driver_id,
            is_booked: row.is_booked != 0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<CampusRow> for Campus {
    fn from(row: CampusRow) -> Self {
        Self {
            campus_id: row.campus_id,
            name: row.name,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}
