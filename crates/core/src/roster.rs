// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::DriverStore;
use steel_track_domain::{Driver, DomainError, NewDriver, validate_driver_fields};
use time::OffsetDateTime;

/// A change set for updating a roster driver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateDriver {
    /// New driver name. Orders keep their denormalized copy of the old
    /// name; re-pointing them is the caller's concern.
    pub name: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Adds a driver to the roster. The store assigns the `DRV-` id.
///
/// # Errors
///
/// Returns `DomainError::InvalidDriverName` for an empty name, or the
/// store error.
pub fn create_driver(
    store: &mut impl DriverStore,
    input: &NewDriver,
    now: OffsetDateTime,
) -> Result<Driver, CoreError> {
    validate_driver_fields(input)?;
    let driver: Driver = store.insert_driver(input, now)?;
    Ok(driver)
}

/// Applies a change set to a roster driver.
///
/// # Errors
///
/// Returns `DomainError::DriverNotFound` if the id is unknown,
/// `DomainError::InvalidDriverName` if the new name is empty, or the
/// store error.
pub fn update_driver(
    store: &mut impl DriverStore,
    driver_id: &str,
    changes: &UpdateDriver,
    now: OffsetDateTime,
) -> Result<Driver, CoreError> {
    let Some(mut driver) = store.get_driver(driver_id)? else {
        return Err(CoreError::DomainViolation(DomainError::DriverNotFound {
            driver_id: driver_id.to_string(),
        }));
    };

    if let Some(name) = &changes.name {
        if name.is_empty() {
            return Err(CoreError::DomainViolation(DomainError::InvalidDriverName(
                String::from("Driver name cannot be empty"),
            )));
        }
        driver.name.clone_from(name);
    }
    if let Some(phone_number) = &changes.phone_number {
        driver.phone_number.clone_from(phone_number);
    }
    if let Some(is_active) = changes.is_active {
        driver.is_active = is_active;
    }
    driver.updated_at = now;

    store.update_driver(&driver)?;
    Ok(driver)
}

/// Removes a driver from the roster.
///
/// Orders referencing the driver keep their denormalized name; their
/// history is not rewritten.
///
/// # Errors
///
/// Returns `DomainError::DriverNotFound` if the id is unknown, or the
/// store error.
pub fn delete_driver(store: &mut impl DriverStore, driver_id: &str) -> Result<(), CoreError> {
    if store.delete_driver(driver_id)? {
        return Ok(());
    }
    Err(CoreError::DomainViolation(DomainError::DriverNotFound {
        driver_id: driver_id.to_string(),
    }))
}
