// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{ConflictReason, CoreError};
use crate::store::{NewCampus, TransitStore};
use campus_transit_domain::{Campus, DomainError};
use tracing::info;

/// Registers a campus, guarding against exact duplicates.
///
/// # Errors
///
/// - [`CoreError::Validation`] if the name is empty.
/// - [`CoreError::Conflict`] if a campus with the same name and location
///   already exists.
pub fn create_campus<S: TransitStore>(
    store: &mut S,
    name: String,
    latitude: f64,
    longitude: f64,
) -> Result<Campus, CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(DomainError::MissingField("name")));
    }

    if store.find_campus(&name, latitude, longitude)?.is_some() {
        return Err(CoreError::Conflict(ConflictReason::DuplicateCampus { name }));
    }

    let campus = store.insert_campus(NewCampus {
        name,
        latitude,
        longitude,
    })?;
    info!(campus_id = campus.campus_id, name = %campus.name, "campus registered");
    Ok(campus)
}

/// Looks up a campus by id.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if no campus has the id.
/// - [`CoreError::Store`] if the record store fails.
pub fn campus_by_id<S: TransitStore>(store: &mut S, campus_id: i64) -> Result<Campus, CoreError> {
    store
        .campus(campus_id)?
        .ok_or_else(|| CoreError::not_found("campus", campus_id))
}

/// All registered campuses.
///
/// # Errors
///
/// Returns [`CoreError::Store`] if the record store fails.
pub fn campuses<S: TransitStore>(store: &mut S) -> Result<Vec<Campus>, CoreError> {
    Ok(store.campuses()?)
}
