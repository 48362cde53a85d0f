// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Request fields arrive as `Option`s so that missing-field errors name
//! the field instead of failing deserialization wholesale; the
//! conversion methods check presence and parse the string-typed fields
//! into domain values.

use crate::error::{ApiError, translate_domain_error};
use campus_transit::{BookingDetails, BookingDraft};
use campus_transit_domain::{
    Booking, Campus, Capacity, DomainError, LatLng, Manifest, Vehicle, VehicleClass,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, ApiError> {
    value.ok_or_else(|| translate_domain_error(DomainError::MissingField(field)))
}

/// API request to create a new booking.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateBookingRequest {
    /// The requesting user's identifier.
    pub requester_id: Option<i64>,
    /// The campus the trip belongs to.
    pub campus_id: Option<i64>,
    /// The pickup coordinates.
    pub origin: Option<LatLng>,
    /// The pickup address, for display.
    pub origin_address: Option<String>,
    /// The drop-off coordinates.
    pub destination: Option<LatLng>,
    /// The drop-off address, for display.
    pub destination_address: Option<String>,
    /// The requested vehicle class ("Buggy", "Transport Truck", "Bot").
    pub vehicle_class: Option<String>,
    /// The pickup instant (RFC 3339).
    pub schedule: Option<String>,
    /// The passenger or cargo manifest.
    pub manifest: Option<Manifest>,
}

impl CreateBookingRequest {
    /// Checks field presence and parses the request into a draft the
    /// lifecycle controller accepts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] naming the first missing or
    /// malformed field.
    pub fn into_draft(self) -> Result<BookingDraft, ApiError> {
        let vehicle_class: VehicleClass = require(self.vehicle_class, "vehicle_class")?
            .parse()
            .map_err(translate_domain_error)?;
        let schedule_text = require(self.schedule, "schedule")?;
        let schedule = OffsetDateTime::parse(&schedule_text, &Rfc3339)
            .map_err(|_| translate_domain_error(DomainError::InvalidSchedule(schedule_text)))?;

        Ok(BookingDraft {
            requester_id: require(self.requester_id, "requester_id")?,
            campus_id: require(self.campus_id, "campus_id")?,
            origin: require(self.origin, "origin")?,
            origin_address: require(self.origin_address, "origin_address")?,
            destination: require(self.destination, "destination")?,
            destination_address: require(self.destination_address, "destination_address")?,
            vehicle_class,
            schedule,
            manifest: require(self.manifest, "manifest")?,
        })
    }
}

/// API request to verify a booking's pickup passcode.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VerifyOtpRequest {
    /// The 4-digit code the driver collected at pickup.
    pub otp: Option<String>,
}

impl VerifyOtpRequest {
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] if the code is absent.
    pub fn into_code(self) -> Result<String, ApiError> {
        require(self.otp, "otp")
    }
}

/// API request for a manual booking status change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateStatusRequest {
    /// The target status ("verified", "completed", "cancelled", "emergency").
    pub status: Option<String>,
}

impl UpdateStatusRequest {
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] if the status is absent.
    pub fn into_status(self) -> Result<String, ApiError> {
        require(self.status, "status")
    }
}

/// API request to emergency-stop a booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmergencyStopRequest {
    /// Why the trip was stopped. Genuinely optional.
    pub reason: Option<String>,
}

/// Capacity limits on a vehicle-creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CapacityRequest {
    /// Maximum passengers (1..=3).
    pub passengers: u8,
    /// Maximum weighted items (1..=3).
    pub weight: u8,
}

/// API request to onboard a new fleet vehicle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateVehicleRequest {
    /// The vehicle class ("Buggy", "Transport Truck", "Bot").
    pub vehicle_class: Option<String>,
    /// The fleet-unique call sign.
    pub identifier: Option<String>,
    /// Seat and cargo limits.
    pub capacity: Option<CapacityRequest>,
}

impl CreateVehicleRequest {
    /// Checks field presence and parses the request into domain values.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] naming the first missing or
    /// out-of-range field.
    pub fn into_parts(self) -> Result<(VehicleClass, String, Capacity), ApiError> {
        let vehicle_class: VehicleClass = require(self.vehicle_class, "vehicle_class")?
            .parse()
            .map_err(translate_domain_error)?;
        let identifier = require(self.identifier, "identifier")?;
        let limits = require(self.capacity, "capacity")?;
        let capacity =
            Capacity::new(limits.passengers, limits.weight).map_err(translate_domain_error)?;
        Ok((vehicle_class, identifier, capacity))
    }
}

/// API request to assign a driver to a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignDriverRequest {
    /// The vehicle receiving the driver.
    pub vehicle_id: Option<i64>,
    /// The driver to seat.
    pub driver_id: Option<i64>,
}

impl AssignDriverRequest {
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] if either id is absent.
    pub fn into_ids(self) -> Result<(i64, i64), ApiError> {
        Ok((
            require(self.vehicle_id, "vehicle_id")?,
            require(self.driver_id, "driver_id")?,
        ))
    }
}

/// API request to record a vehicle's latest position.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UpdateLocationRequest {
    /// The vehicle's fleet call sign.
    pub identifier: Option<String>,
    /// Reported latitude.
    pub lat: Option<f64>,
    /// Reported longitude.
    pub lng: Option<f64>,
}

impl UpdateLocationRequest {
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] if any field is absent.
    pub fn into_parts(self) -> Result<(String, LatLng), ApiError> {
        let identifier = require(self.identifier, "identifier")?;
        let lat = require(self.lat, "lat")?;
        let lng = require(self.lng, "lng")?;
        Ok((identifier, LatLng::new(lat, lng)))
    }
}

/// API request to register a campus.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateCampusRequest {
    /// The campus display name.
    pub name: Option<String>,
    /// Campus center latitude.
    pub latitude: Option<f64>,
    /// Campus center longitude.
    pub longitude: Option<f64>,
}

impl CreateCampusRequest {
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] if any field is absent.
    pub fn into_parts(self) -> Result<(String, f64, f64), ApiError> {
        Ok((
            require(self.name, "name")?,
            require(self.latitude, "latitude")?,
            require(self.longitude, "longitude")?,
        ))
    }
}

/// API response carrying one booking.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BookingResponse {
    /// A success message.
    pub message: String,
    /// The booking after the operation.
    pub booking: Booking,
}

/// One booking joined with its campus for display.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BookingView {
    /// The booking record.
    pub booking: Booking,
    /// The campus the trip belongs to, when it still exists.
    pub campus: Option<Campus>,
}

impl From<BookingDetails> for BookingView {
    fn from(details: BookingDetails) -> Self {
        Self {
            booking: details.booking,
            campus: details.campus,
        }
    }
}

/// API response for booking listings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BookingListResponse {
    /// The bookings, campuses populated.
    pub bookings: Vec<BookingView>,
}

impl BookingListResponse {
    pub(crate) fn from_details(details: Vec<BookingDetails>) -> Self {
        Self {
            bookings: details.into_iter().map(BookingView::from).collect(),
        }
    }
}

/// API response carrying one vehicle.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VehicleResponse {
    /// A success message.
    pub message: String,
    /// The vehicle after the operation.
    pub vehicle: Vehicle,
}

/// API response for fleet listings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VehicleListResponse {
    /// The whole fleet.
    pub vehicles: Vec<Vehicle>,
}

/// API response carrying one campus.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CampusResponse {
    /// A success message.
    pub message: String,
    /// The campus after the operation.
    pub campus: Campus,
}

/// API response for campus listings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CampusListResponse {
    /// All registered campuses.
    pub campuses: Vec<Campus>,
}
