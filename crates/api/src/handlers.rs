// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for booking, fleet, and campus operations.
//!
//! Handlers are the transport-agnostic boundary: they check request
//! shape, hand validated values to the core, and translate core errors
//! into the [`ApiError`] taxonomy. They hold no business rules of their
//! own.

use campus_transit::DispatchNotifier;
use campus_transit_domain::{BookingStatus, Otp};
use campus_transit_persistence::Persistence;
use time::OffsetDateTime;
use tracing::info;

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AssignDriverRequest, BookingListResponse, BookingResponse, BookingView, CampusListResponse,
    CampusResponse, CreateBookingRequest, CreateCampusRequest, CreateVehicleRequest,
    EmergencyStopRequest, UpdateLocationRequest, UpdateStatusRequest, VehicleListResponse,
    VehicleResponse, VerifyOtpRequest,
};

/// Creates a booking and triggers the dispatch-timing decision.
///
/// # Errors
///
/// Returns an error if a required field is missing or malformed, the
/// manifest does not fit the vehicle class, or the campus is unknown.
pub fn create_booking(
    store: &mut Persistence,
    notifier: &dyn DispatchNotifier,
    request: CreateBookingRequest,
    now: OffsetDateTime,
) -> Result<BookingResponse, ApiError> {
    let draft = request.into_draft()?;
    let booking =
        campus_transit::create_booking(store, notifier, draft, now).map_err(translate_core_error)?;
    Ok(BookingResponse {
        message: String::from("Booking created. Waiting for vehicle assignment."),
        booking,
    })
}

/// Runs the matching engine against a booking.
///
/// # Errors
///
/// Returns an error if the booking is unknown, already assigned or
/// closed, or no eligible vehicle is free.
pub fn assign_vehicle(
    store: &mut Persistence,
    booking_id: i64,
) -> Result<BookingResponse, ApiError> {
    let booking = campus_transit::assign_vehicle(store, booking_id).map_err(translate_core_error)?;
    Ok(BookingResponse {
        message: String::from("Vehicle assigned to booking."),
        booking,
    })
}

/// Loads one booking with its campus populated.
///
/// # Errors
///
/// Returns an error if the booking does not exist.
pub fn booking_by_id(store: &mut Persistence, booking_id: i64) -> Result<BookingView, ApiError> {
    campus_transit::booking_details(store, booking_id)
        .map(BookingView::from)
        .map_err(translate_core_error)
}

/// All bookings for a requester, newest schedule first.
///
/// # Errors
///
/// Returns an error if the record store fails.
pub fn bookings_for_requester(
    store: &mut Persistence,
    requester_id: i64,
) -> Result<BookingListResponse, ApiError> {
    campus_transit::bookings_for_requester(store, requester_id)
        .map(BookingListResponse::from_details)
        .map_err(translate_core_error)
}

/// Closed bookings for a requester, newest schedule first.
///
/// # Errors
///
/// Returns an error if the record store fails.
pub fn past_bookings(
    store: &mut Persistence,
    requester_id: i64,
) -> Result<BookingListResponse, ApiError> {
    campus_transit::past_bookings(store, requester_id)
        .map(BookingListResponse::from_details)
        .map_err(translate_core_error)
}

/// Bookings scheduled at or after `now`, soonest first.
///
/// # Errors
///
/// Returns an error if the record store fails.
pub fn upcoming_bookings(
    store: &mut Persistence,
    requester_id: i64,
    now: OffsetDateTime,
) -> Result<BookingListResponse, ApiError> {
    campus_transit::upcoming_bookings(store, requester_id, now)
        .map(BookingListResponse::from_details)
        .map_err(translate_core_error)
}

/// Verifies the pickup passcode, moving the booking to `verified`.
///
/// # Errors
///
/// Returns an error if the code is absent or malformed, the booking is
/// unknown, the code does not match, or the booking already left
/// `unverified`.
pub fn verify_otp(
    store: &mut Persistence,
    booking_id: i64,
    request: VerifyOtpRequest,
) -> Result<BookingResponse, ApiError> {
    let submitted = Otp::new(&request.into_code()?).map_err(translate_domain_error)?;
    let booking =
        campus_transit::verify_otp(store, booking_id, &submitted).map_err(translate_core_error)?;
    Ok(BookingResponse {
        message: String::from("Pickup passcode verified."),
        booking,
    })
}

/// Applies a manual status change, restricted to the transition table.
///
/// # Errors
///
/// Returns an error if the status is absent or unrecognized, the
/// booking is unknown, or the transition is not permitted.
pub fn update_status(
    store: &mut Persistence,
    booking_id: i64,
    request: UpdateStatusRequest,
) -> Result<BookingResponse, ApiError> {
    let target: BookingStatus = request
        .into_status()?
        .parse()
        .map_err(translate_domain_error)?;
    let booking =
        campus_transit::update_status(store, booking_id, target).map_err(translate_core_error)?;
    Ok(BookingResponse {
        message: String::from("Booking status updated."),
        booking,
    })
}

/// Cancels a booking, releasing any held vehicle.
///
/// # Errors
///
/// Returns an error if the booking is unknown, already cancelled, or
/// otherwise closed.
pub fn cancel_booking(
    store: &mut Persistence,
    booking_id: i64,
) -> Result<BookingResponse, ApiError> {
    let booking = campus_transit::cancel_booking(store, booking_id).map_err(translate_core_error)?;
    Ok(BookingResponse {
        message: String::from("Booking cancelled."),
        booking,
    })
}

/// Emergency-stops a booking, recording an optional reason.
///
/// # Errors
///
/// Returns an error if the booking is unknown, already stopped, or
/// otherwise closed.
pub fn emergency_stop(
    store: &mut Persistence,
    booking_id: i64,
    request: EmergencyStopRequest,
) -> Result<BookingResponse, ApiError> {
    let booking = campus_transit::emergency_stop(store, booking_id, request.reason)
        .map_err(translate_core_error)?;
    Ok(BookingResponse {
        message: String::from("Booking emergency stopped."),
        booking,
    })
}

/// Completes a verified booking, releasing its vehicle.
///
/// # Errors
///
/// Returns an error if the booking is unknown or not `verified`.
pub fn complete_booking(
    store: &mut Persistence,
    booking_id: i64,
) -> Result<BookingResponse, ApiError> {
    let booking =
        campus_transit::complete_booking(store, booking_id).map_err(translate_core_error)?;
    Ok(BookingResponse {
        message: String::from("Booking completed."),
        booking,
    })
}

/// Onboards a new fleet vehicle.
///
/// # Errors
///
/// Returns an error if a field is missing, the class or capacity is
/// invalid, or the identifier is already in the fleet.
pub fn create_vehicle(
    store: &mut Persistence,
    request: CreateVehicleRequest,
) -> Result<VehicleResponse, ApiError> {
    let (vehicle_class, identifier, capacity) = request.into_parts()?;
    let vehicle = campus_transit::create_vehicle(store, vehicle_class, identifier, capacity)
        .map_err(translate_core_error)?;
    Ok(VehicleResponse {
        message: String::from("Vehicle created."),
        vehicle,
    })
}

/// Assigns a driver to a vehicle.
///
/// # Errors
///
/// Returns an error if either id is missing, the vehicle is unknown, or
/// the one-driver-one-vehicle invariant would be violated.
pub fn assign_driver(
    store: &mut Persistence,
    request: AssignDriverRequest,
) -> Result<VehicleResponse, ApiError> {
    let (vehicle_id, driver_id) = request.into_ids()?;
    let vehicle = campus_transit::assign_driver(store, vehicle_id, driver_id)
        .map_err(translate_core_error)?;
    Ok(VehicleResponse {
        message: String::from("Driver assigned to vehicle successfully."),
        vehicle,
    })
}

/// The whole fleet.
///
/// # Errors
///
/// Returns an error if the record store fails.
pub fn vehicles(store: &mut Persistence) -> Result<VehicleListResponse, ApiError> {
    campus_transit::vehicles(store)
        .map(|vehicles| VehicleListResponse { vehicles })
        .map_err(translate_core_error)
}

/// Loads one vehicle by id.
///
/// # Errors
///
/// Returns an error if the vehicle does not exist.
pub fn vehicle_by_id(
    store: &mut Persistence,
    vehicle_id: i64,
) -> Result<VehicleResponse, ApiError> {
    let vehicle = campus_transit::vehicle_by_id(store, vehicle_id).map_err(translate_core_error)?;
    Ok(VehicleResponse {
        message: String::from("Vehicle found."),
        vehicle,
    })
}

/// The vehicle a driver currently holds.
///
/// # Errors
///
/// Returns an error if the driver holds no vehicle.
pub fn vehicle_for_driver(
    store: &mut Persistence,
    driver_id: i64,
) -> Result<VehicleResponse, ApiError> {
    let vehicle =
        campus_transit::vehicle_for_driver(store, driver_id).map_err(translate_core_error)?;
    Ok(VehicleResponse {
        message: String::from("Vehicle found."),
        vehicle,
    })
}

/// Records a vehicle's latest reported position.
///
/// # Errors
///
/// Returns an error if a field is missing or the identifier is unknown.
pub fn update_vehicle_location(
    store: &mut Persistence,
    request: UpdateLocationRequest,
) -> Result<VehicleResponse, ApiError> {
    let (identifier, location) = request.into_parts()?;
    let vehicle = campus_transit::update_vehicle_location(store, &identifier, location)
        .map_err(translate_core_error)?;
    info!(
        identifier = %vehicle.identifier,
        lat = vehicle.location.lat,
        lng = vehicle.location.lng,
        "vehicle location updated"
    );
    Ok(VehicleResponse {
        message: String::from("Vehicle location updated."),
        vehicle,
    })
}

/// Registers a campus, guarding against exact duplicates.
///
/// # Errors
///
/// Returns an error if a field is missing, the name is blank, or an
/// identical campus already exists.
pub fn create_campus(
    store: &mut Persistence,
    request: CreateCampusRequest,
) -> Result<CampusResponse, ApiError> {
    let (name, latitude, longitude) = request.into_parts()?;
    let campus = campus_transit::create_campus(store, name, latitude, longitude)
        .map_err(translate_core_error)?;
    Ok(CampusResponse {
        message: String::from("Campus created."),
        campus,
    })
}

/// All registered campuses.
///
/// # Errors
///
/// Returns an error if the record store fails.
pub fn campuses(store: &mut Persistence) -> Result<CampusListResponse, ApiError> {
    campus_transit::campuses(store)
        .map(|campuses| CampusListResponse { campuses })
        .map_err(translate_core_error)
}
