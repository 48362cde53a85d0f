// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking lifecycle controller.
//!
//! The single authority permitted to mutate booking status and release
//! vehicles. Status changes go through the transition table on
//! [`BookingStatus`]; terminal transitions release any held vehicle
//! inside one store transaction; every conditional write reports a lost
//! race as a conflict instead of silently clobbering a concurrent
//! update.

use crate::dispatch::{DispatchDecision, decide_dispatch};
use crate::error::{ConflictReason, CoreError};
use crate::notifier::DispatchNotifier;
use crate::store::{NewBooking, TransitStore};
use campus_transit_domain::{
    Booking, BookingStatus, Campus, LatLng, Manifest, Otp, VehicleClass, validate_manifest,
};
use time::OffsetDateTime;
use tracing::{info, warn};

/// A validated booking request, ready to persist.
///
/// Field presence was already checked at the API boundary; the
/// controller validates the domain rules (manifest/class pairing,
/// campus existence) before writing.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub requester_id: i64,
    pub campus_id: i64,
    pub origin: LatLng,
    pub origin_address: String,
    pub destination: LatLng,
    pub destination_address: String,
    pub vehicle_class: VehicleClass,
    pub schedule: OffsetDateTime,
    pub manifest: Manifest,
}

/// A booking joined with its campus for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetails {
    pub booking: Booking,
    pub campus: Option<Campus>,
}

/// Creates a booking and triggers the dispatch-timing decision.
///
/// The booking is persisted as `unverified` with a fresh 4-digit
/// passcode and no vehicle. If the schedule is more than two minutes
/// out, the notifier gateway is asked for a scheduled notification at
/// the pickup instant; otherwise drivers are notified immediately.
/// Gateway failures are logged and do not fail the creation.
///
/// # Errors
///
/// - [`CoreError::Validation`] if the manifest does not fit the class.
/// - [`CoreError::NotFound`] if the campus does not exist.
/// - [`CoreError::Store`] if the record store fails.
pub fn create_booking<S: TransitStore, N: DispatchNotifier + ?Sized>(
    store: &mut S,
    notifier: &N,
    draft: BookingDraft,
    now: OffsetDateTime,
) -> Result<Booking, CoreError> {
    validate_manifest(draft.vehicle_class, &draft.manifest)?;

    store
        .campus(draft.campus_id)?
        .ok_or_else(|| CoreError::not_found("campus", draft.campus_id))?;

    let booking = store.insert_booking(NewBooking {
        requester_id: draft.requester_id,
        campus_id: draft.campus_id,
        origin: draft.origin,
        origin_address: draft.origin_address,
        destination: draft.destination,
        destination_address: draft.destination_address,
        vehicle_class: draft.vehicle_class,
        schedule: draft.schedule,
        manifest: draft.manifest,
        otp: Otp::generate(),
    })?;

    let outcome = match decide_dispatch(booking.schedule, now) {
        DispatchDecision::Immediate => {
            info!(booking_id = booking.booking_id, "dispatching drivers now");
            notifier.notify_immediate(booking.booking_id)
        }
        DispatchDecision::Scheduled { pickup_at } => {
            info!(
                booking_id = booking.booking_id,
                %pickup_at,
                "scheduling driver notification"
            );
            notifier.notify_scheduled(booking.booking_id, booking.requester_id, pickup_at)
        }
    };
    if let Err(err) = outcome {
        // Booking creation is not coupled to notification delivery.
        warn!(
            booking_id = booking.booking_id,
            error = %err,
            "dispatch notification failed; booking retained"
        );
    }

    Ok(booking)
}

/// Verifies the pickup passcode, moving the booking to `verified`.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if the booking does not exist.
/// - [`CoreError::InvalidOtp`] if the codes differ; status is unchanged.
/// - [`CoreError::Conflict`] if the booking is not `unverified`, or was
///   modified concurrently.
pub fn verify_otp<S: TransitStore>(
    store: &mut S,
    booking_id: i64,
    submitted: &Otp,
) -> Result<Booking, CoreError> {
    let booking = load(store, booking_id)?;

    if !booking.otp.matches(submitted) {
        return Err(CoreError::InvalidOtp { booking_id });
    }

    ensure_transition(&booking, BookingStatus::Verified)?;

    if !store.mark_verified(booking_id)? {
        return Err(CoreError::Conflict(ConflictReason::ConcurrentUpdate {
            booking_id,
        }));
    }
    info!(booking_id, "pickup passcode verified");
    load(store, booking_id)
}

/// Applies a manual status change, restricted to the transition table.
///
/// Transitions into a terminal state release any held vehicle; the
/// original free-form overwrite is deliberately not supported.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if the booking does not exist.
/// - [`CoreError::Conflict`] for illegal transitions or lost races.
pub fn update_status<S: TransitStore>(
    store: &mut S,
    booking_id: i64,
    target: BookingStatus,
) -> Result<Booking, CoreError> {
    let booking = load(store, booking_id)?;
    ensure_transition(&booking, target)?;

    let applied = if target.is_terminal() {
        store.finalize_booking(booking_id, booking.status, target, None)?
    } else {
        store.set_status(booking_id, booking.status, target)?
    };
    if !applied {
        return Err(CoreError::Conflict(ConflictReason::ConcurrentUpdate {
            booking_id,
        }));
    }
    info!(booking_id, status = %target, "booking status updated");
    load(store, booking_id)
}

/// Cancels a booking, releasing any held vehicle.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if the booking does not exist.
/// - [`CoreError::Conflict`] if already cancelled, otherwise terminal,
///   or modified concurrently.
pub fn cancel_booking<S: TransitStore>(
    store: &mut S,
    booking_id: i64,
) -> Result<Booking, CoreError> {
    let booking = load(store, booking_id)?;

    if booking.status == BookingStatus::Cancelled {
        return Err(CoreError::Conflict(ConflictReason::AlreadyCancelled {
            booking_id,
        }));
    }
    finalize(store, &booking, BookingStatus::Cancelled, None)
}

/// Emergency-stops a booking, recording an optional reason and releasing
/// any held vehicle.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if the booking does not exist.
/// - [`CoreError::Conflict`] if already stopped, otherwise terminal, or
///   modified concurrently.
pub fn emergency_stop<S: TransitStore>(
    store: &mut S,
    booking_id: i64,
    reason: Option<String>,
) -> Result<Booking, CoreError> {
    let booking = load(store, booking_id)?;

    if booking.status == BookingStatus::Emergency {
        return Err(CoreError::Conflict(ConflictReason::AlreadyStopped {
            booking_id,
        }));
    }
    finalize(store, &booking, BookingStatus::Emergency, reason)
}

/// Completes a booking, releasing any held vehicle.
///
/// Only `verified` bookings complete; completing an unverified or
/// already-closed booking is rejected by the transition table.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if the booking does not exist.
/// - [`CoreError::Conflict`] for illegal transitions or lost races.
pub fn complete_booking<S: TransitStore>(
    store: &mut S,
    booking_id: i64,
) -> Result<Booking, CoreError> {
    let booking = load(store, booking_id)?;
    finalize(store, &booking, BookingStatus::Completed, None)
}

/// Loads one booking with its campus populated.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the booking does not exist.
pub fn booking_details<S: TransitStore>(
    store: &mut S,
    booking_id: i64,
) -> Result<BookingDetails, CoreError> {
    let booking = load(store, booking_id)?;
    with_campus(store, booking)
}

/// All bookings for a requester, campuses populated.
///
/// # Errors
///
/// Returns [`CoreError::Store`] if the record store fails.
pub fn bookings_for_requester<S: TransitStore>(
    store: &mut S,
    requester_id: i64,
) -> Result<Vec<BookingDetails>, CoreError> {
    let bookings = store.bookings_for_requester(requester_id)?;
    join_campuses(store, bookings)
}

/// Terminal bookings for a requester, schedule descending.
///
/// # Errors
///
/// Returns [`CoreError::Store`] if the record store fails.
pub fn past_bookings<S: TransitStore>(
    store: &mut S,
    requester_id: i64,
) -> Result<Vec<BookingDetails>, CoreError> {
    let bookings = store.past_bookings(requester_id)?;
    join_campuses(store, bookings)
}

/// Bookings scheduled at or after `now`, schedule ascending.
///
/// # Errors
///
/// Returns [`CoreError::Store`] if the record store fails.
pub fn upcoming_bookings<S: TransitStore>(
    store: &mut S,
    requester_id: i64,
    now: OffsetDateTime,
) -> Result<Vec<BookingDetails>, CoreError> {
    let bookings = store.upcoming_bookings(requester_id, now)?;
    join_campuses(store, bookings)
}

fn load<S: TransitStore>(store: &mut S, booking_id: i64) -> Result<Booking, CoreError> {
    store
        .booking(booking_id)?
        .ok_or_else(|| CoreError::not_found("booking", booking_id))
}

fn ensure_transition(booking: &Booking, target: BookingStatus) -> Result<(), CoreError> {
    if booking.status.can_transition_to(target) {
        Ok(())
    } else {
        Err(CoreError::Conflict(ConflictReason::InvalidTransition {
            from: booking.status,
            to: target,
        }))
    }
}

fn finalize<S: TransitStore>(
    store: &mut S,
    booking: &Booking,
    target: BookingStatus,
    emergency_reason: Option<String>,
) -> Result<Booking, CoreError> {
    ensure_transition(booking, target)?;

    if !store.finalize_booking(booking.booking_id, booking.status, target, emergency_reason)? {
        return Err(CoreError::Conflict(ConflictReason::ConcurrentUpdate {
            booking_id: booking.booking_id,
        }));
    }
    info!(
        booking_id = booking.booking_id,
        status = %target,
        released_vehicle = ?booking.vehicle_id,
        "booking closed"
    );
    load(store, booking.booking_id)
}

fn with_campus<S: TransitStore>(
    store: &mut S,
    booking: Booking,
) -> Result<BookingDetails, CoreError> {
    let campus = store.campus(booking.campus_id)?;
    Ok(BookingDetails { booking, campus })
}

fn join_campuses<S: TransitStore>(
    store: &mut S,
    bookings: Vec<Booking>,
) -> Result<Vec<BookingDetails>, CoreError> {
    bookings
        .into_iter()
        .map(|booking| with_campus(store, booking))
        .collect()
}
