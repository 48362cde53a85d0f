// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The dispatch-timing decision.
//!
//! The sole rule selecting immediate versus scheduled driver
//! notification. Bookings further than [`DISPATCH_LEAD`] in the future
//! get a scheduled notification at the pickup instant; everything else
//! (including past-due and exactly-at-threshold schedules) dispatches
//! immediately. The comparison is strict: a schedule exactly two minutes
//! out takes the immediate branch.

use time::{Duration, OffsetDateTime};

/// How far ahead a booking must be scheduled before driver notification
/// is deferred to the gateway's scheduler.
pub const DISPATCH_LEAD: Duration = Duration::minutes(2);

/// Which notification path a new booking takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchDecision {
    /// Notify available drivers now.
    Immediate,
    /// Ask the gateway to notify at the pickup instant.
    Scheduled { pickup_at: OffsetDateTime },
}

/// Decides the notification path for a booking created at `now`.
#[must_use]
pub fn decide_dispatch(schedule: OffsetDateTime, now: OffsetDateTime) -> DispatchDecision {
    if schedule - now > DISPATCH_LEAD {
        DispatchDecision::Scheduled {
            pickup_at: schedule,
        }
    } else {
        DispatchDecision::Immediate
    }
}
