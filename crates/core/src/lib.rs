// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core logic for the Campus Transit dispatch system.
//!
//! This crate contains the two algorithmic hearts of the system: the
//! vehicle matching engine ([`assign_vehicle`]) and the booking lifecycle
//! controller ([`lifecycle`]). Both are written against the injected
//! [`TransitStore`] record-store trait and the [`DispatchNotifier`]
//! gateway trait, so they carry no I/O of their own and are fully
//! deterministic under test.

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

mod campuses;
mod dispatch;
mod error;
mod lifecycle;
mod matching;
mod notifier;
mod registry;
mod store;

#[cfg(test)]
mod tests;

pub use campuses::{campus_by_id, campuses, create_campus};
pub use dispatch::{DISPATCH_LEAD, DispatchDecision, decide_dispatch};
pub use error::{ConflictReason, CoreError};
pub use lifecycle::{
    BookingDetails, BookingDraft, booking_details, bookings_for_requester, cancel_booking,
    complete_booking, create_booking, emergency_stop, past_bookings, update_status,
    upcoming_bookings, verify_otp,
};
pub use matching::assign_vehicle;
pub use notifier::{DispatchNotifier, NotifyError};
pub use registry::{
    DEFAULT_DEPOT, assign_driver, create_vehicle, update_vehicle_location, vehicle_by_id,
    vehicle_for_driver, vehicles,
};
pub use store::{NewBooking, NewCampus, NewVehicle, StoreError, TransitStore};
