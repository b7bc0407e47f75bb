// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for SteelTrack.
//!
//! This crate stores the active order set, the history order set, and
//! the driver roster in `SQLite` via Diesel, and implements the core
//! repository traits (`OrderStore`, `DriverStore`) on top of them.
//!
//! ## Backend
//!
//! `SQLite` is the only backend:
//! - In-memory databases for unit and integration tests
//! - File databases (WAL mode) for real deployments
//!
//! `SQLite` support is always available and requires no external
//! infrastructure.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against in-memory `SQLite`
//! - Each test database gets a unique name via an atomic counter, so
//!   shared-cache connections never collide between tests

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use steel_track_core::{DriverStore, OrderStore, StoreError};
use steel_track_domain::{
    CycleWindow, DeliveredOrder, DeliveryNumber, Driver, NewDriver, Order, OrderRecord,
};
use time::OffsetDateTime;
use tracing::debug;

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{DriverRow, HistoryOrderRow, OrderRow};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a `SQLite` connection.
///
/// Implements the core repository traits; lifecycle and aggregation
/// code never sees Diesel types.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // WAL mode for better read concurrency on file databases
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }
}

impl OrderStore for Persistence {
    fn insert_active(&mut self, order: &Order) -> Result<(), StoreError> {
        debug!(delivery_number = %order.delivery_number, "Inserting active order");
        let row: OrderRow = OrderRow::from_domain(order)?;
        mutations::upsert_active_order(&mut self.conn, &row)?;
        Ok(())
    }

    fn get_active(
        &mut self,
        delivery_number: &DeliveryNumber,
    ) -> Result<Option<Order>, StoreError> {
        let row: Option<OrderRow> =
            queries::get_active_order(&mut self.conn, delivery_number.value())?;
        row.map(|r| r.into_domain().map_err(StoreError::from)).transpose()
    }

    fn list_active(&mut self) -> Result<Vec<Order>, StoreError> {
        let rows: Vec<OrderRow> = queries::list_active_orders(&mut self.conn)?;
        rows.into_iter()
            .map(|r| r.into_domain().map_err(StoreError::from))
            .collect()
    }

    fn update_active(&mut self, order: &Order) -> Result<(), StoreError> {
        debug!(delivery_number = %order.delivery_number, "Updating active order");
        let row: OrderRow = OrderRow::from_domain(order)?;
        mutations::update_active_order(&mut self.conn, &row)?;
        Ok(())
    }

    fn delete_active(&mut self, delivery_number: &DeliveryNumber) -> Result<bool, StoreError> {
        debug!(delivery_number = %delivery_number, "Deleting active order");
        Ok(mutations::delete_active_order(
            &mut self.conn,
            delivery_number.value(),
        )?)
    }

    fn insert_delivered(&mut self, order: &DeliveredOrder) -> Result<(), StoreError> {
        debug!(
            delivery_number = %order.order.delivery_number,
            "Inserting history order"
        );
        let row: HistoryOrderRow = HistoryOrderRow::from_domain(order)?;
        mutations::upsert_history_order(&mut self.conn, &row)?;
        Ok(())
    }

    fn get_delivered(
        &mut self,
        delivery_number: &DeliveryNumber,
    ) -> Result<Option<DeliveredOrder>, StoreError> {
        let row: Option<HistoryOrderRow> =
            queries::get_history_order(&mut self.conn, delivery_number.value())?;
        row.map(|r| r.into_domain().map_err(StoreError::from)).transpose()
    }

    fn list_delivered(&mut self) -> Result<Vec<DeliveredOrder>, StoreError> {
        let rows: Vec<HistoryOrderRow> = queries::list_history_orders(&mut self.conn)?;
        rows.into_iter()
            .map(|r| r.into_domain().map_err(StoreError::from))
            .collect()
    }

    fn update_delivered(&mut self, order: &DeliveredOrder) -> Result<(), StoreError> {
        debug!(
            delivery_number = %order.order.delivery_number,
            "Updating history order"
        );
        let row: HistoryOrderRow = HistoryOrderRow::from_domain(order)?;
        mutations::update_history_order(&mut self.conn, &row)?;
        Ok(())
    }

    fn delete_delivered(&mut self, delivery_number: &DeliveryNumber) -> Result<bool, StoreError> {
        debug!(delivery_number = %delivery_number, "Deleting history order");
        Ok(mutations::delete_history_order(
            &mut self.conn,
            delivery_number.value(),
        )?)
    }

    fn orders_for_driver(
        &mut self,
        driver_name: &str,
        window: CycleWindow,
    ) -> Result<Vec<OrderRecord>, StoreError> {
        let active: Vec<OrderRow> =
            queries::active_orders_for_driver(&mut self.conn, driver_name, window)?;
        let delivered: Vec<HistoryOrderRow> =
            queries::history_orders_for_driver(&mut self.conn, driver_name, window)?;

        let mut records: Vec<OrderRecord> = Vec::with_capacity(active.len() + delivered.len());
        for row in active {
            records.push(OrderRecord::Active(
                row.into_domain().map_err(StoreError::from)?,
            ));
        }
        for row in delivered {
            records.push(OrderRecord::Delivered(
                row.into_domain().map_err(StoreError::from)?,
            ));
        }
        records.sort_by(|a, b| b.order_date().cmp(&a.order_date()));
        Ok(records)
    }
}

impl DriverStore for Persistence {
    fn insert_driver(
        &mut self,
        new: &NewDriver,
        now: OffsetDateTime,
    ) -> Result<Driver, StoreError> {
        let timestamp: String = data_models::format_timestamp(now)?;
        let row = data_models::NewDriverRow {
            // Backfilled from the rowid inside the insert transaction.
            driver_id: String::new(),
            name: new.name.clone(),
            phone_number: new.phone_number.clone(),
            is_active: i32::from(new.is_active),
            created_at: timestamp.clone(),
            updated_at: timestamp,
        };
        let driver_id: String = mutations::insert_driver(&mut self.conn, &row)?;
        debug!(driver_id = %driver_id, name = %new.name, "Inserted driver");
        Ok(Driver {
            driver_id,
            name: new.name.clone(),
            phone_number: new.phone_number.clone(),
            is_active: new.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    fn get_driver(&mut self, driver_id: &str) -> Result<Option<Driver>, StoreError> {
        let row: Option<DriverRow> = queries::get_driver(&mut self.conn, driver_id)?;
        row.map(|r| r.into_domain().map_err(StoreError::from)).transpose()
    }

    fn list_drivers(&mut self) -> Result<Vec<Driver>, StoreError> {
        let rows: Vec<DriverRow> = queries::list_drivers(&mut self.conn)?;
        rows.into_iter()
            .map(|r| r.into_domain().map_err(StoreError::from))
            .collect()
    }

    fn update_driver(&mut self, driver: &Driver) -> Result<(), StoreError> {
        debug!(driver_id = %driver.driver_id, "Updating driver");
        let updated_at: String = data_models::format_timestamp(driver.updated_at)?;
        mutations::update_driver(
            &mut self.conn,
            &driver.driver_id,
            &driver.name,
            &driver.phone_number,
            driver.is_active,
            &updated_at,
        )?;
        Ok(())
    }

    fn delete_driver(&mut self, driver_id: &str) -> Result<bool, StoreError> {
        debug!(driver_id = %driver_id, "Deleting driver");
        Ok(mutations::delete_driver(&mut self.conn, driver_id)?)
    }
}
