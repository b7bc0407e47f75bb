// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order and driver query operations.
//!
//! Single-backend (`SQLite`) monomorphic functions. Date columns hold
//! ISO `YYYY-MM-DD` strings, so lexicographic range filters are
//! calendar-correct.

use crate::data_models::{DriverRow, HistoryOrderRow, OrderRow, format_date};
use crate::diesel_schema::{drivers, history_orders, orders};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use steel_track_domain::CycleWindow;

/// Query one active order by delivery number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_active_order(
    conn: &mut SqliteConnection,
    delivery_number: &str,
) -> Result<Option<OrderRow>, PersistenceError> {
    orders::table
        .filter(orders::delivery_number.eq(delivery_number))
        .first::<OrderRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_active_order: {e}")))
}

/// Query the entire active set, newest order date first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_active_orders(conn: &mut SqliteConnection) -> Result<Vec<OrderRow>, PersistenceError> {
    orders::table
        .order((orders::order_date.desc(), orders::created_at.desc()))
        .load::<OrderRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_active_orders: {e}")))
}

/// Query one history order by delivery number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_history_order(
    conn: &mut SqliteConnection,
    delivery_number: &str,
) -> Result<Option<HistoryOrderRow>, PersistenceError> {
    history_orders::table
        .filter(history_orders::delivery_number.eq(delivery_number))
        .first::<HistoryOrderRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_history_order: {e}")))
}

/// Query the entire history set, newest order date first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_history_orders(
    conn: &mut SqliteConnection,
) -> Result<Vec<HistoryOrderRow>, PersistenceError> {
    history_orders::table
        .order((
            history_orders::order_date.desc(),
            history_orders::created_at.desc(),
        ))
        .load::<HistoryOrderRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_history_orders: {e}")))
}

/// Query active orders for one driver inside a window, inclusive on
/// both ends.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn active_orders_for_driver(
    conn: &mut SqliteConnection,
    driver_name: &str,
    window: CycleWindow,
) -> Result<Vec<OrderRow>, PersistenceError> {
    let start: String = format_date(window.start)?;
    let end: String = format_date(window.end)?;
    orders::table
        .filter(orders::driver_name.eq(driver_name))
        .filter(orders::order_date.ge(start))
        .filter(orders::order_date.le(end))
        .order(orders::order_date.desc())
        .load::<OrderRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("active_orders_for_driver: {e}")))
}

/// Query history orders for one driver inside a window, inclusive on
/// both ends.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn history_orders_for_driver(
    conn: &mut SqliteConnection,
    driver_name: &str,
    window: CycleWindow,
) -> Result<Vec<HistoryOrderRow>, PersistenceError> {
    let start: String = format_date(window.start)?;
    let end: String = format_date(window.end)?;
    history_orders::table
        .filter(history_orders::driver_name.eq(driver_name))
        .filter(history_orders::order_date.ge(start))
        .filter(history_orders::order_date.le(end))
        .order(history_orders::order_date.desc())
        .load::<HistoryOrderRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("history_orders_for_driver: {e}")))
}

/// Query one driver by its `DRV-` id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_driver(
    conn: &mut SqliteConnection,
    driver_id: &str,
) -> Result<Option<DriverRow>, PersistenceError> {
    drivers::table
        .filter(drivers::driver_id.eq(driver_id))
        .first::<DriverRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_driver: {e}")))
}

/// Query the entire roster in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_drivers(conn: &mut SqliteConnection) -> Result<Vec<DriverRow>, PersistenceError> {
    drivers::table
        .order(drivers::id.asc())
        .load::<DriverRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_drivers: {e}")))
}
