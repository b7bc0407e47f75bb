// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Fixed billing rate used to derive an order's amount from its tonnage.
pub const UNIT_RATE_PER_TON: f64 = 100.0;

/// Rounds a value to two decimal places.
///
/// Used for derived tonnage and amount figures so that aggregates are
/// stable regardless of float accumulation order.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Represents an order's delivery number.
///
/// The delivery number is the sole identity of an order across both the
/// active and history sets. Comparison is exact: case, whitespace, and
/// special characters are all significant, and no normalization is
/// performed. Two values differing only by case are distinct identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryNumber {
    value: String,
}

impl DeliveryNumber {
    /// Creates a new `DeliveryNumber`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyDeliveryNumber` if the value is empty.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyDeliveryNumber);
        }
        Ok(Self {
            value: value.to_owned(),
        })
    }

    /// Returns the delivery number value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for DeliveryNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents the lifecycle state of an order.
///
/// Only two values are lifecycle-significant: an order is either still
/// being worked (`InProgress`, living in the active set) or has been
/// delivered (`Delivered`, living in the history set). Legacy UI values
/// such as `pending` or `delayed` are rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// The order is in the active set, awaiting delivery.
    #[default]
    #[serde(rename = "in-progress")]
    InProgress,
    /// The order has been delivered and lives in the history set.
    #[serde(rename = "delivered")]
    Delivered,
}

impl OrderStatus {
    /// Converts this status to its wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Delivered => "delivered",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-progress" => Ok(Self::InProgress),
            "delivered" => Ok(Self::Delivered),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The delivery shift an order is scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Shift {
    /// Morning shift.
    #[default]
    #[serde(rename = "morning")]
    Morning,
    /// Night shift.
    #[serde(rename = "night")]
    Night,
}

impl Shift {
    /// Converts this shift to its wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Night => "night",
        }
    }
}

impl FromStr for Shift {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "night" => Ok(Self::Night),
            _ => Err(DomainError::InvalidShift(s.to_string())),
        }
    }
}

/// The fabrication type of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderType {
    /// Straight bar stock.
    #[default]
    #[serde(rename = "straight-bar")]
    StraightBar,
    /// Cut-and-bend fabrication.
    #[serde(rename = "cut-and-bend")]
    CutAndBend,
}

impl OrderType {
    /// Converts this order type to its wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StraightBar => "straight-bar",
            Self::CutAndBend => "cut-and-bend",
        }
    }
}

impl FromStr for OrderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "straight-bar" => Ok(Self::StraightBar),
            "cut-and-bend" => Ok(Self::CutAndBend),
            _ => Err(DomainError::InvalidOrderType(s.to_string())),
        }
    }
}

/// The nine nominal bar diameters an order's tonnage can be broken down by.
///
/// This key set is a fixed contract shared with the data store schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarSize {
    #[serde(rename = "8mm")]
    Mm8,
    #[serde(rename = "10mm")]
    Mm10,
    #[serde(rename = "12mm")]
    Mm12,
    #[serde(rename = "14mm")]
    Mm14,
    #[serde(rename = "16mm")]
    Mm16,
    #[serde(rename = "18mm")]
    Mm18,
    #[serde(rename = "20mm")]
    Mm20,
    #[serde(rename = "25mm")]
    Mm25,
    #[serde(rename = "32mm")]
    Mm32,
}

impl BarSize {
    /// All nine sizes in ascending diameter order.
    pub const ALL: [Self; 9] = [
        Self::Mm8,
        Self::Mm10,
        Self::Mm12,
        Self::Mm14,
        Self::Mm16,
        Self::Mm18,
        Self::Mm20,
        Self::Mm25,
        Self::Mm32,
    ];

    /// Converts this size to its wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mm8 => "8mm",
            Self::Mm10 => "10mm",
            Self::Mm12 => "12mm",
            Self::Mm14 => "14mm",
            Self::Mm16 => "16mm",
            Self::Mm18 => "18mm",
            Self::Mm20 => "20mm",
            Self::Mm25 => "25mm",
            Self::Mm32 => "32mm",
        }
    }
}

impl FromStr for BarSize {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "8mm" => Ok(Self::Mm8),
            "10mm" => Ok(Self::Mm10),
            "12mm" => Ok(Self::Mm12),
            "14mm" => Ok(Self::Mm14),
            "16mm" => Ok(Self::Mm16),
            "18mm" => Ok(Self::Mm18),
            "20mm" => Ok(Self::Mm20),
            "25mm" => Ok(Self::Mm25),
            "32mm" => Ok(Self::Mm32),
            _ => Err(DomainError::InvalidBarSize(s.to_string())),
        }
    }
}

/// Tons per nominal bar diameter for a single order.
///
/// Every entry defaults to zero and must be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Breakdown {
    #[serde(rename = "8mm", default)]
    pub mm8: f64,
    #[serde(rename = "10mm", default)]
    pub mm10: f64,
    #[serde(rename = "12mm", default)]
    pub mm12: f64,
    #[serde(rename = "14mm", default)]
    pub mm14: f64,
    #[serde(rename = "16mm", default)]
    pub mm16: f64,
    #[serde(rename = "18mm", default)]
    pub mm18: f64,
    #[serde(rename = "20mm", default)]
    pub mm20: f64,
    #[serde(rename = "25mm", default)]
    pub mm25: f64,
    #[serde(rename = "32mm", default)]
    pub mm32: f64,
}

impl Breakdown {
    /// Returns the tons recorded for a given bar size.
    #[must_use]
    pub const fn get(&self, size: BarSize) -> f64 {
        match size {
            BarSize::Mm8 => self.mm8,
            BarSize::Mm10 => self.mm10,
            BarSize::Mm12 => self.mm12,
            BarSize::Mm14 => self.mm14,
            BarSize::Mm16 => self.mm16,
            BarSize::Mm18 => self.mm18,
            BarSize::Mm20 => self.mm20,
            BarSize::Mm25 => self.mm25,
            BarSize::Mm32 => self.mm32,
        }
    }

    /// Sums all nine entries.
    #[must_use]
    pub fn total(&self) -> f64 {
        BarSize::ALL.iter().map(|size| self.get(*size)).sum()
    }

    /// Returns true if every entry is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        BarSize::ALL.iter().all(|size| self.get(*size) == 0.0)
    }
}

/// Input for creating a new order.
///
/// Carries the caller-supplied fields; derived fields (amount, timestamps)
/// are computed when the order is materialized into a set.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// The delivery number identity.
    pub delivery_number: DeliveryNumber,
    /// The customer/delivery name.
    pub delivery_name: String,
    /// The ordering company.
    pub company: String,
    /// The delivery site.
    pub site: String,
    /// Denormalized driver name (matched by exact string, not id).
    pub driver_name: Option<String>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// The order date (user-editable, defaults to the creation day).
    pub order_date: Date,
    /// The delivery shift.
    pub shift: Shift,
    /// The fabrication type.
    pub order_type: OrderType,
    /// Whether a signed delivery note is on file.
    pub signed_delivery_note: bool,
    /// Total tons ordered.
    pub tons: f64,
    /// Tons per bar diameter.
    pub breakdown: Breakdown,
    /// Requested initial status. `Delivered` places the order directly
    /// into the history set with no separate transition step.
    pub status: OrderStatus,
}

/// An order in the active set.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// The delivery number identity.
    pub delivery_number: DeliveryNumber,
    /// The customer/delivery name.
    pub delivery_name: String,
    /// The ordering company.
    pub company: String,
    /// The delivery site.
    pub site: String,
    /// Denormalized driver name.
    pub driver_name: Option<String>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// The order date.
    pub order_date: Date,
    /// The delivery shift.
    pub shift: Shift,
    /// The fabrication type.
    pub order_type: OrderType,
    /// Whether a signed delivery note is on file.
    pub signed_delivery_note: bool,
    /// Total tons ordered.
    pub tons: f64,
    /// Billing amount, `tons * UNIT_RATE_PER_TON`.
    pub amount: f64,
    /// Tons per bar diameter.
    pub breakdown: Breakdown,
    /// Creation timestamp (UTC).
    pub created_at: OffsetDateTime,
    /// Last update timestamp (UTC).
    pub updated_at: OffsetDateTime,
}

impl Order {
    /// Materializes a new active order from creation input.
    #[must_use]
    pub fn from_new(new: NewOrder, now: OffsetDateTime) -> Self {
        let amount: f64 = round2(new.tons * UNIT_RATE_PER_TON);
        Self {
            delivery_number: new.delivery_number,
            delivery_name: new.delivery_name,
            company: new.company,
            site: new.site,
            driver_name: new.driver_name,
            phone_number: new.phone_number,
            order_date: new.order_date,
            shift: new.shift,
            order_type: new.order_type,
            signed_delivery_note: new.signed_delivery_note,
            tons: new.tons,
            amount,
            breakdown: new.breakdown,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An order in the history set.
///
/// The same logical entity as [`Order`] once its status becomes
/// `delivered`, carrying the additional moment of delivery. The original
/// order date is preserved through the transition.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveredOrder {
    /// The underlying order fields.
    pub order: Order,
    /// The moment the order was marked delivered (UTC).
    pub delivered_at: OffsetDateTime,
}

impl DeliveredOrder {
    /// Builds a history record from an active order at the moment of
    /// delivery.
    #[must_use]
    pub fn from_active(mut order: Order, delivered_at: OffsetDateTime) -> Self {
        order.updated_at = delivered_at;
        Self {
            order,
            delivered_at,
        }
    }

    /// Materializes a history record directly from creation input.
    ///
    /// Used when the caller requests `delivered` status at creation.
    #[must_use]
    pub fn from_new(new: NewOrder, now: OffsetDateTime) -> Self {
        Self {
            order: Order::from_new(new, now),
            delivered_at: now,
        }
    }

    /// Extracts the active representation, dropping `delivered_at`.
    ///
    /// Used on reactivation; the original order date and all other
    /// fields are preserved.
    #[must_use]
    pub fn into_active(self, now: OffsetDateTime) -> Order {
        let mut order: Order = self.order;
        order.updated_at = now;
        order
    }
}

/// A tagged view of an order in either set.
///
/// The discriminant is decided once, when the record is loaded from the
/// data store, and is never re-inferred from field shape.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderRecord {
    /// The order lives in the active set.
    Active(Order),
    /// The order lives in the history set.
    Delivered(DeliveredOrder),
}

impl OrderRecord {
    /// Returns the delivery number identity of this record.
    #[must_use]
    pub const fn delivery_number(&self) -> &DeliveryNumber {
        match self {
            Self::Active(order) => &order.delivery_number,
            Self::Delivered(delivered) => &delivered.order.delivery_number,
        }
    }

    /// Returns the lifecycle status implied by the set this record
    /// lives in.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        match self {
            Self::Active(_) => OrderStatus::InProgress,
            Self::Delivered(_) => OrderStatus::Delivered,
        }
    }

    /// Returns the order date.
    #[must_use]
    pub const fn order_date(&self) -> Date {
        match self {
            Self::Active(order) => order.order_date,
            Self::Delivered(delivered) => delivered.order.order_date,
        }
    }

    /// Returns the denormalized driver name, if any.
    #[must_use]
    pub fn driver_name(&self) -> Option<&str> {
        match self {
            Self::Active(order) => order.driver_name.as_deref(),
            Self::Delivered(delivered) => delivered.order.driver_name.as_deref(),
        }
    }

    /// Returns the total tons.
    #[must_use]
    pub const fn tons(&self) -> f64 {
        match self {
            Self::Active(order) => order.tons,
            Self::Delivered(delivered) => delivered.order.tons,
        }
    }

    /// Returns the fabrication type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        match self {
            Self::Active(order) => order.order_type,
            Self::Delivered(delivered) => delivered.order.order_type,
        }
    }
}

/// Input for creating a roster driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDriver {
    /// The driver's name (the denormalized join key for orders).
    pub name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Whether the driver is currently active.
    pub is_active: bool,
}

/// A driver on the roster.
///
/// Orders associate with a driver by exact name string, not by id; the
/// id exists only to address the roster entry itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    /// Generated roster id (`DRV-` prefixed).
    pub driver_id: String,
    /// The driver's name. Case-sensitive join key for orders.
    pub name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Whether the driver is currently active.
    pub is_active: bool,
    /// Creation timestamp (UTC).
    pub created_at: OffsetDateTime,
    /// Last update timestamp (UTC).
    pub updated_at: OffsetDateTime,
}

/// Per-driver order metrics over a date window.
///
/// A read-time projection recomputed on demand by scanning the active
/// and history sets; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverMetrics {
    /// The roster id of the driver.
    pub driver_id: String,
    /// The driver's name.
    pub driver_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Whether the driver is currently active.
    pub is_active: bool,
    /// Orders matched in the window.
    pub total_orders: u32,
    /// Matched orders with delivered status.
    pub completed_orders: u32,
    /// Matched orders not yet delivered.
    pub pending_orders: u32,
    /// Sum of matched order tons, rounded to two decimal places.
    pub total_tons: f64,
    /// Window start date (inclusive).
    pub cycle_start: Date,
    /// Window end date (inclusive).
    pub cycle_end: Date,
}
