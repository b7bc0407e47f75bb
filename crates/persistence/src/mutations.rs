// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order and driver mutation operations.
//!
//! Inserts into the two order tables use `replace_into` so that a
//! retried half-finished move converges instead of failing on the
//! primary key.

use crate::data_models::{HistoryOrderRow, NewDriverRow, OrderRow};
use crate::diesel_schema::{drivers, history_orders, orders};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Insert or replace an active order row.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_active_order(
    conn: &mut SqliteConnection,
    row: &OrderRow,
) -> Result<(), PersistenceError> {
    diesel::replace_into(orders::table)
        .values(row)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("upsert_active_order: {e}")))?;
    Ok(())
}

/// Rewrite an existing active order row.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row matched.
pub fn update_active_order(
    conn: &mut SqliteConnection,
    row: &OrderRow,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(orders::table.filter(orders::delivery_number.eq(&row.delivery_number)))
            .set(row)
            .execute(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("update_active_order: {e}")))?;
    if affected == 0 {
        return Err(PersistenceError::NotFound(row.delivery_number.clone()));
    }
    Ok(())
}

/// Delete an active order row. Returns whether a row was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_active_order(
    conn: &mut SqliteConnection,
    delivery_number: &str,
) -> Result<bool, PersistenceError> {
    let affected: usize =
        diesel::delete(orders::table.filter(orders::delivery_number.eq(delivery_number)))
            .execute(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("delete_active_order: {e}")))?;
    Ok(affected > 0)
}

/// Insert or replace a history order row.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_history_order(
    conn: &mut SqliteConnection,
    row: &HistoryOrderRow,
) -> Result<(), PersistenceError> {
    diesel::replace_into(history_orders::table)
        .values(row)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("upsert_history_order: {e}")))?;
    Ok(())
}

/// Rewrite an existing history order row.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row matched.
pub fn update_history_order(
    conn: &mut SqliteConnection,
    row: &HistoryOrderRow,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        history_orders::table.filter(history_orders::delivery_number.eq(&row.delivery_number)),
    )
    .set(row)
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("update_history_order: {e}")))?;
    if affected == 0 {
        return Err(PersistenceError::NotFound(row.delivery_number.clone()));
    }
    Ok(())
}

/// Delete a history order row. Returns whether a row was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_history_order(
    conn: &mut SqliteConnection,
    delivery_number: &str,
) -> Result<bool, PersistenceError> {
    let affected: usize = diesel::delete(
        history_orders::table.filter(history_orders::delivery_number.eq(delivery_number)),
    )
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("delete_history_order: {e}")))?;
    Ok(affected > 0)
}

/// Insert a driver and backfill its `DRV-` id from the rowid.
///
/// Returns the assigned id. Two statements inside one transaction: the
/// row lands with a placeholder id, then the id is derived from
/// `last_insert_rowid()`.
///
/// # Errors
///
/// Returns an error if the insert or the backfill fails.
pub fn insert_driver(
    conn: &mut SqliteConnection,
    row: &NewDriverRow,
) -> Result<String, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(drivers::table)
            .values(row)
            .execute(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("insert_driver: {e}")))?;
        let rowid: i64 = get_last_insert_rowid(conn)?;
        let driver_id: String = format!("DRV-{rowid}");
        diesel::update(drivers::table.filter(drivers::id.eq(rowid)))
            .set(drivers::driver_id.eq(&driver_id))
            .execute(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("insert_driver backfill: {e}")))?;
        Ok(driver_id)
    })
}

/// Rewrite a driver's mutable fields.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row matched.
pub fn update_driver(
    conn: &mut SqliteConnection,
    driver_id: &str,
    name: &str,
    phone_number: &str,
    is_active: bool,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(drivers::table.filter(drivers::driver_id.eq(driver_id)))
            .set((
                drivers::name.eq(name),
                drivers::phone_number.eq(phone_number),
                drivers::is_active.eq(i32::from(is_active)),
                drivers::updated_at.eq(updated_at),
            ))
            .execute(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("update_driver: {e}")))?;
    if affected == 0 {
        return Err(PersistenceError::NotFound(driver_id.to_string()));
    }
    Ok(())
}

/// Delete a driver row. Returns whether a row was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_driver(
    conn: &mut SqliteConnection,
    driver_id: &str,
) -> Result<bool, PersistenceError> {
    let affected: usize =
        diesel::delete(drivers::table.filter(drivers::driver_id.eq(driver_id)))
            .execute(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("delete_driver: {e}")))?;
    Ok(affected > 0)
}
