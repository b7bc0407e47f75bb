// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Connection establishment, migration application, and foreign key
//! enforcement are also exercised implicitly by every store test that
//! calls `Persistence::new_in_memory()`.

use crate::{Persistence, PersistenceError};
use steel_track_core::OrderStore;
use steel_track_domain::Order;
use time::macros::date;

use super::{create_test_new_order, test_now};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_active() {
    let mut db = Persistence::new_in_memory().unwrap();
    assert!(db.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    let order: Order = Order::from_new(
        create_test_new_order("DN-001", date!(2026 - 03 - 10), 5.0),
        test_now(),
    );
    db1.insert_active(&order).unwrap();

    assert_eq!(db1.list_active().unwrap().len(), 1, "db1 should see its order");
    assert!(db2.list_active().unwrap().is_empty(), "db2 should be isolated");
}

#[test]
fn test_file_database_initialization() {
    let dir = std::env::temp_dir().join(format!("steel_track_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("steel_track.db");

    let result: Result<Persistence, PersistenceError> = Persistence::new_with_file(&path);
    assert!(result.is_ok());

    drop(result);
    let _ = std::fs::remove_dir_all(&dir);
}
