// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Static campus reference entity.
///
/// Campuses exist only as a foreign reference on bookings; no core logic
/// depends on them beyond existence and display joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campus {
    pub campus_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}
