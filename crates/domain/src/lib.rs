// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod booking;
mod booking_status;
mod campus;
mod error;
mod otp;
mod types;
mod validation;
mod vehicle;

#[cfg(test)]
mod tests;

pub use booking::{Booking, ItemDetail, Manifest, Passenger, WeightItem};
pub use booking_status::BookingStatus;
pub use campus::Campus;
pub use error::DomainError;
pub use otp::Otp;
pub use types::{Capacity, LatLng, VehicleClass};
pub use validation::{validate_identifier, validate_manifest};
pub use vehicle::Vehicle;
