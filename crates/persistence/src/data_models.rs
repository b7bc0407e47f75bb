// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and row↔domain conversion.
//!
//! Status, shift, and order type strings are parsed exactly once, here,
//! when a row is loaded; which table a row came from decides whether it
//! becomes an active or a delivered record. Nothing downstream re-infers
//! the lifecycle state from field shape.

use crate::error::PersistenceError;
use diesel::prelude::*;
use steel_track_domain::{
    Breakdown, DeliveredOrder, DeliveryNumber, Driver, Order, OrderType, Shift,
};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// ISO calendar-date format used for all date columns.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(&DATE_FORMAT)
        .map_err(|e| PersistenceError::CorruptRow(format!("format date: {e}")))
}

pub fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, &DATE_FORMAT)
        .map_err(|e| PersistenceError::CorruptRow(format!("parse date '{value}': {e}")))
}

pub fn format_timestamp(moment: OffsetDateTime) -> Result<String, PersistenceError> {
    moment
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::CorruptRow(format!("format timestamp: {e}")))
}

pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::CorruptRow(format!("parse timestamp '{value}': {e}")))
}

/// Row in the `orders` table.
#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = crate::diesel_schema::orders)]
#[diesel(treat_none_as_null = true)]
pub struct OrderRow {
    pub delivery_number: String,
    pub delivery_name: String,
    pub company: String,
    pub site: String,
    pub driver_name: Option<String>,
    pub phone_number: Option<String>,
    pub order_date: String,
    pub shift: String,
    pub order_type: String,
    pub signed_delivery_note: i32,
    pub tons: f64,
    pub amount: f64,
    pub breakdown_8mm: f64,
    pub breakdown_10mm: f64,
    pub breakdown_12mm: f64,
    pub breakdown_14mm: f64,
    pub breakdown_16mm: f64,
    pub breakdown_18mm: f64,
    pub breakdown_20mm: f64,
    pub breakdown_25mm: f64,
    pub breakdown_32mm: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Row in the `history_orders` table.
#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = crate::diesel_schema::history_orders)]
#[diesel(treat_none_as_null = true)]
pub struct HistoryOrderRow {
    pub delivery_number: String,
    pub delivery_name: String,
    pub company: String,
    pub site: String,
    pub driver_name: Option<String>,
    pub phone_number: Option<String>,
    pub order_date: String,
    pub shift: String,
    pub order_type: String,
    pub signed_delivery_note: i32,
    pub tons: f64,
    pub amount: f64,
    pub breakdown_8mm: f64,
    pub breakdown_10mm: f64,
    pub breakdown_12mm: f64,
    pub breakdown_14mm: f64,
    pub breakdown_16mm: f64,
    pub breakdown_18mm: f64,
    pub breakdown_20mm: f64,
    pub breakdown_25mm: f64,
    pub breakdown_32mm: f64,
    pub created_at: String,
    pub updated_at: String,
    pub delivered_at: String,
}

/// Row in the `drivers` table.
#[derive(Debug, Clone, Queryable)]
pub struct DriverRow {
    pub id: i64,
    pub driver_id: String,
    pub name: String,
    pub phone_number: String,
    pub is_active: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Insertable driver row; the `DRV-` id is backfilled from the rowid
/// after insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::drivers)]
pub struct NewDriverRow {
    pub driver_id: String,
    pub name: String,
    pub phone_number: String,
    pub is_active: i32,
    pub created_at: String,
    pub updated_at: String,
}

fn breakdown_columns(breakdown: &Breakdown) -> [f64; 9] {
    [
        breakdown.mm8,
        breakdown.mm10,
        breakdown.mm12,
        breakdown.mm14,
        breakdown.mm16,
        breakdown.mm18,
        breakdown.mm20,
        breakdown.mm25,
        breakdown.mm32,
    ]
}

impl OrderRow {
    /// Flattens an active order into its row representation.
    ///
    /// # Errors
    ///
    /// Returns an error if a date or timestamp cannot be formatted.
    pub fn from_domain(order: &Order) -> Result<Self, PersistenceError> {
        let [b8, b10, b12, b14, b16, b18, b20, b25, b32] = breakdown_columns(&order.breakdown);
        Ok(Self {
            delivery_number: order.delivery_number.value().to_string(),
            delivery_name: order.delivery_name.clone(),
            company: order.company.clone(),
            site: order.site.clone(),
            driver_name: order.driver_name.clone(),
            phone_number: order.phone_number.clone(),
            order_date: format_date(order.order_date)?,
            shift: order.shift.as_str().to_string(),
            order_type: order.order_type.as_str().to_string(),
            signed_delivery_note: i32::from(order.signed_delivery_note),
            tons: order.tons,
            amount: order.amount,
            breakdown_8mm: b8,
            breakdown_10mm: b10,
            breakdown_12mm: b12,
            breakdown_14mm: b14,
            breakdown_16mm: b16,
            breakdown_18mm: b18,
            breakdown_20mm: b20,
            breakdown_25mm: b25,
            breakdown_32mm: b32,
            created_at: format_timestamp(order.created_at)?,
            updated_at: format_timestamp(order.updated_at)?,
        })
    }

    /// Rebuilds the active order this row stores.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRow` if a stored string fails
    /// to parse back into its domain value.
    pub fn into_domain(self) -> Result<Order, PersistenceError> {
        let delivery_number: DeliveryNumber = DeliveryNumber::new(&self.delivery_number)
            .map_err(|e| PersistenceError::CorruptRow(e.to_string()))?;
        let shift: Shift = self
            .shift
            .parse()
            .map_err(|e: steel_track_domain::DomainError| {
                PersistenceError::CorruptRow(e.to_string())
            })?;
        let order_type: OrderType =
            self.order_type
                .parse()
                .map_err(|e: steel_track_domain::DomainError| {
                    PersistenceError::CorruptRow(e.to_string())
                })?;
        Ok(Order {
            delivery_number,
            delivery_name: self.delivery_name,
            company: self.company,
            site: self.site,
            driver_name: self.driver_name,
            phone_number: self.phone_number,
            order_date: parse_date(&self.order_date)?,
            shift,
            order_type,
            signed_delivery_note: self.signed_delivery_note != 0,
            tons: self.tons,
            amount: self.amount,
            breakdown: Breakdown {
                mm8: self.breakdown_8mm,
                mm10: self.breakdown_10mm,
                mm12: self.breakdown_12mm,
                mm14: self.breakdown_14mm,
                mm16: self.breakdown_16mm,
                mm18: self.breakdown_18mm,
                mm20: self.breakdown_20mm,
                mm25: self.breakdown_25mm,
                mm32: self.breakdown_32mm,
            },
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

impl HistoryOrderRow {
    /// Flattens a delivered order into its row representation.
    ///
    /// # Errors
    ///
    /// Returns an error if a date or timestamp cannot be formatted.
    pub fn from_domain(delivered: &DeliveredOrder) -> Result<Self, PersistenceError> {
        let row: OrderRow = OrderRow::from_domain(&delivered.order)?;
        Ok(Self {
            delivery_number: row.delivery_number,
            delivery_name: row.delivery_name,
            company: row.company,
            site: row.site,
            driver_name: row.driver_name,
            phone_number: row.phone_number,
            order_date: row.order_date,
            shift: row.shift,
            order_type: row.order_type,
            signed_delivery_note: row.signed_delivery_note,
            tons: row.tons,
            amount: row.amount,
            breakdown_8mm: row.breakdown_8mm,
            breakdown_10mm: row.breakdown_10mm,
            breakdown_12mm: row.breakdown_12mm,
            breakdown_14mm: row.breakdown_14mm,
            breakdown_16mm: row.breakdown_16mm,
            breakdown_18mm: row.breakdown_18mm,
            breakdown_20mm: row.breakdown_20mm,
            breakdown_25mm: row.breakdown_25mm,
            breakdown_32mm: row.breakdown_32mm,
            created_at: row.created_at,
            updated_at: row.updated_at,
            delivered_at: format_timestamp(delivered.delivered_at)?,
        })
    }

    /// Rebuilds the delivered order this row stores.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRow` if a stored string fails
    /// to parse back into its domain value.
    pub fn into_domain(self) -> Result<DeliveredOrder, PersistenceError> {
        let delivered_at: OffsetDateTime = parse_timestamp(&self.delivered_at)?;
        let order_row: OrderRow = OrderRow {
            delivery_number: self.delivery_number,
            delivery_name: self.delivery_name,
            company: self.company,
            site: self.site,
            driver_name: self.driver_name,
            phone_number: self.phone_number,
            order_date: self.order_date,
            shift: self.shift,
            order_type: self.order_type,
            signed_delivery_note: self.signed_delivery_note,
            tons: self.tons,
            amount: self.amount,
            breakdown_8mm: self.breakdown_8mm,
            breakdown_10mm: self.breakdown_10mm,
            breakdown_12mm: self.breakdown_12mm,
            breakdown_14mm: self.breakdown_14mm,
            breakdown_16mm: self.breakdown_16mm,
            breakdown_18mm: self.breakdown_18mm,
            breakdown_20mm: self.breakdown_20mm,
            breakdown_25mm: self.breakdown_25mm,
            breakdown_32mm: self.breakdown_32mm,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        Ok(DeliveredOrder {
            order: order_row.into_domain()?,
            delivered_at,
        })
    }
}

impl DriverRow {
    /// Rebuilds the roster driver this row stores.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRow` if a stored timestamp
    /// fails to parse.
    pub fn into_domain(self) -> Result<Driver, PersistenceError> {
        Ok(Driver {
            driver_id: self.driver_id,
            name: self.name,
            phone_number: self.phone_number,
            is_active: self.is_active != 0,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}
