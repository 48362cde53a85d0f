// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;
use time::OffsetDateTime;

/// Errors from the dispatch notifier gateway.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    /// The gateway could not be reached.
    #[error("Notifier gateway unavailable: {0}")]
    Unavailable(String),

    /// The gateway rejected the notification request.
    #[error("Notification rejected: {0}")]
    Rejected(String),
}

/// External gateway that alerts drivers about dispatchable bookings.
///
/// The core only decides *when* to notify (immediately or at the
/// scheduled pickup); delivery mechanics, retries, and timers all live
/// behind this boundary. Gateway failures are logged by the caller and
/// never roll back the booking that triggered them.
pub trait DispatchNotifier {
    /// Asks the gateway to alert available drivers right now.
    ///
    /// # Errors
    ///
    /// Returns a [`NotifyError`] if the gateway cannot accept the request.
    fn notify_immediate(&self, booking_id: i64) -> Result<(), NotifyError>;

    /// Asks the gateway to alert a driver shortly before `pickup_at`.
    ///
    /// # Errors
    ///
    /// Returns a [`NotifyError`] if the gateway cannot accept the request.
    fn notify_scheduled(
        &self,
        booking_id: i64,
        requester_id: i64,
        pickup_at: OffsetDateTime,
    ) -> Result<(), NotifyError>;
}
