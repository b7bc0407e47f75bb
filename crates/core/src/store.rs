// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use steel_track_domain::{
    CycleWindow, DeliveredOrder, DeliveryNumber, Driver, NewDriver, Order, OrderRecord,
};
use time::OffsetDateTime;

/// Errors surfaced by a repository implementation.
///
/// Each store call is a request against a possibly remote collaborator;
/// any failure mode it has collapses to one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store failed (connection, query, corrupt row).
    Backend(String),
    /// A row the operation required does not exist.
    NotFound(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(msg) => write!(f, "Store backend failure: {msg}"),
            Self::NotFound(msg) => write!(f, "Store row not found: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Repository for the two order sets.
///
/// The active and history sets are keyed by delivery number. Lifecycle
/// code keeps them disjoint; the store itself only guarantees per-set
/// key uniqueness.
pub trait OrderStore {
    /// Inserts an order into the active set, replacing any existing row
    /// with the same delivery number. Move retries rely on the replace
    /// semantics to converge.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the write fails.
    fn insert_active(&mut self, order: &Order) -> Result<(), StoreError>;

    /// Looks up an active order by delivery number.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the read fails.
    fn get_active(&mut self, delivery_number: &DeliveryNumber) -> Result<Option<Order>, StoreError>;

    /// Lists the entire active set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the read fails.
    fn list_active(&mut self) -> Result<Vec<Order>, StoreError>;

    /// Rewrites an existing active order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no row has the delivery number,
    /// or `StoreError::Backend` if the write fails.
    fn update_active(&mut self, order: &Order) -> Result<(), StoreError>;

    /// Deletes an active order. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the delete fails.
    fn delete_active(&mut self, delivery_number: &DeliveryNumber) -> Result<bool, StoreError>;

    /// Inserts an order into the history set, replacing any existing row
    /// with the same delivery number.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the write fails.
    fn insert_delivered(&mut self, order: &DeliveredOrder) -> Result<(), StoreError>;

    /// Looks up a history order by delivery number.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the read fails.
    fn get_delivered(
        &mut self,
        delivery_number: &DeliveryNumber,
    ) -> Result<Option<DeliveredOrder>, StoreError>;

    /// Lists the entire history set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the read fails.
    fn list_delivered(&mut self) -> Result<Vec<DeliveredOrder>, StoreError>;

    /// Rewrites an existing history order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no row has the delivery number,
    /// or `StoreError::Backend` if the write fails.
    fn update_delivered(&mut self, order: &DeliveredOrder) -> Result<(), StoreError>;

    /// Deletes a history order. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the delete fails.
    fn delete_delivered(&mut self, delivery_number: &DeliveryNumber) -> Result<bool, StoreError>;

    /// Gathers orders from both sets whose driver name matches exactly
    /// and whose order date falls inside the window, inclusive on both
    /// ends.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the read fails.
    fn orders_for_driver(
        &mut self,
        driver_name: &str,
        window: CycleWindow,
    ) -> Result<Vec<OrderRecord>, StoreError>;
}

/// Repository for the driver roster.
pub trait DriverStore {
    /// Inserts a new driver, assigning its `DRV-` prefixed id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the write fails.
    fn insert_driver(&mut self, new: &NewDriver, now: OffsetDateTime)
    -> Result<Driver, StoreError>;

    /// Looks up a driver by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the read fails.
    fn get_driver(&mut self, driver_id: &str) -> Result<Option<Driver>, StoreError>;

    /// Lists the entire roster.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the read fails.
    fn list_drivers(&mut self) -> Result<Vec<Driver>, StoreError>;

    /// Rewrites an existing driver.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no row has the driver id, or
    /// `StoreError::Backend` if the write fails.
    fn update_driver(&mut self, driver: &Driver) -> Result<(), StoreError>;

    /// Deletes a driver. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the delete fails.
    fn delete_driver(&mut self, driver_id: &str) -> Result<bool, StoreError>;
}
