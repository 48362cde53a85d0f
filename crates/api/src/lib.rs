// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transport-agnostic API boundary for the Campus Transit dispatch
//! system.
//!
//! This crate owns the request/response contract: DTOs with explicit
//! presence validation, the [`ApiError`] taxonomy, and handler functions
//! that drive the core against the `SQLite` persistence adapter. It
//! knows nothing about HTTP; the server crate maps handlers onto routes
//! and `ApiError` variants onto status codes.

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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    assign_driver, assign_vehicle, booking_by_id, bookings_for_requester, campuses,
    cancel_booking, complete_booking, create_booking, create_campus, create_vehicle,
    emergency_stop, past_bookings, update_status, update_vehicle_location, upcoming_bookings,
    vehicle_by_id, vehicle_for_driver, vehicles, verify_otp,
};
pub use request_response::{
    AssignDriverRequest, BookingListResponse, BookingResponse, BookingView, CampusListResponse,
    CampusResponse, CapacityRequest, CreateBookingRequest, CreateCampusRequest,
    CreateVehicleRequest, EmergencyStopRequest, UpdateLocationRequest, UpdateStatusRequest,
    VehicleListResponse, VehicleResponse, VerifyOtpRequest,
};
