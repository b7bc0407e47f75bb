// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CoreError, UpdateDriver, create_driver, delete_driver, update_driver};
use steel_track_domain::{DomainError, NewDriver};
use time::macros::datetime;

use super::helpers::{MemoryDriverStore, create_test_new_driver, test_now};

#[test]
fn test_create_driver_assigns_prefixed_id() {
    let mut store = MemoryDriverStore::default();
    let driver = create_driver(&mut store, &create_test_new_driver("Ahmed Hassan"), test_now())
        .unwrap();

    assert!(driver.driver_id.starts_with("DRV-"));
    assert_eq!(driver.name, "Ahmed Hassan");
    assert!(driver.is_active);
    assert_eq!(driver.created_at, test_now());
}

#[test]
fn test_create_driver_rejects_empty_name() {
    let mut store = MemoryDriverStore::default();
    let input = NewDriver {
        name: String::new(),
        phone_number: String::from("+971501234567"),
        is_active: true,
    };
    let result = create_driver(&mut store, &input, test_now());
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidDriverName(_)))
    ));
}

#[test]
fn test_update_driver_applies_changes() {
    let mut store = MemoryDriverStore::default();
    let driver = create_driver(&mut store, &create_test_new_driver("Ahmed Hassan"), test_now())
        .unwrap();

    let changes = UpdateDriver {
        phone_number: Some(String::from("+971509999999")),
        is_active: Some(false),
        ..UpdateDriver::default()
    };
    let updated_at = datetime!(2026-04-01 12:00:00 UTC);
    let updated = update_driver(&mut store, &driver.driver_id, &changes, updated_at).unwrap();

    assert_eq!(updated.phone_number, "+971509999999");
    assert!(!updated.is_active);
    assert_eq!(updated.updated_at, updated_at);
    assert_eq!(updated.created_at, test_now());
}

#[test]
fn test_update_driver_rejects_empty_name() {
    let mut store = MemoryDriverStore::default();
    let driver = create_driver(&mut store, &create_test_new_driver("Ahmed Hassan"), test_now())
        .unwrap();

    let changes = UpdateDriver {
        name: Some(String::new()),
        ..UpdateDriver::default()
    };
    let result = update_driver(&mut store, &driver.driver_id, &changes, test_now());
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidDriverName(_)))
    ));
}

#[test]
fn test_update_driver_unknown_id_is_not_found() {
    let mut store = MemoryDriverStore::default();
    let result = update_driver(&mut store, "DRV-404", &UpdateDriver::default(), test_now());
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::DriverNotFound { .. }))
    ));
}

#[test]
fn test_delete_driver_twice_is_not_found() {
    let mut store = MemoryDriverStore::default();
    let driver = create_driver(&mut store, &create_test_new_driver("Ahmed Hassan"), test_now())
        .unwrap();

    delete_driver(&mut store, &driver.driver_id).unwrap();
    let result = delete_driver(&mut store, &driver.driver_id);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::DriverNotFound { .. }))
    ));
}
