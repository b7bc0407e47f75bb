// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross the boundary as `[year]-[month]-[day]` strings and
//! timestamps as RFC 3339 strings; the breakdown crosses as a map keyed
//! by the nine nominal bar sizes.

use serde::{Deserialize, Deserializer};
use steel_track_domain::{
    Breakdown, DeliveredOrder, Driver, DriverMetrics, Order, OrderRecord, OrderStatus,
};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

pub(crate) fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}

pub(crate) fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp.format(&Rfc3339).unwrap_or_default()
}

/// Deserializes a present-but-possibly-null field into `Some(None)` for
/// null and `Some(Some(v))` for a value; an absent field stays `None`
/// via `#[serde(default)]`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// API request to create a new order.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct CreateOrderRequest {
    /// The delivery number identity.
    pub delivery_number: String,
    /// The customer/delivery name.
    pub delivery_name: String,
    /// The ordering company.
    pub company: String,
    /// The delivery site.
    pub site: String,
    /// The assigned driver's name, if any.
    #[serde(default)]
    pub driver_name: Option<String>,
    /// A contact phone number, if any.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// The order date as `[year]-[month]-[day]`.
    pub order_date: String,
    /// The shift: `morning` or `night`.
    pub shift: String,
    /// The fabrication type: `straight-bar` or `cut-and-bend`.
    pub order_type: String,
    /// Whether a signed delivery note is on file.
    #[serde(default)]
    pub signed_delivery_note: bool,
    /// Total tons ordered.
    pub tons: f64,
    /// Per-size tonnage breakdown keyed by the nine nominal sizes.
    #[serde(default)]
    pub breakdown: Breakdown,
    /// Starting lifecycle status; defaults to `in-progress`.
    #[serde(default)]
    pub status: Option<String>,
}

/// API request to update an existing order in place.
///
/// Absent fields are left untouched. For `driver_name` and
/// `phone_number` an explicit JSON `null` clears the stored value.
#[derive(Debug, Clone, PartialEq, Default, serde::Deserialize)]
pub struct UpdateOrderRequest {
    /// New customer/delivery name.
    #[serde(default)]
    pub delivery_name: Option<String>,
    /// New ordering company.
    #[serde(default)]
    pub company: Option<String>,
    /// New delivery site.
    #[serde(default)]
    pub site: Option<String>,
    /// New driver name; `null` clears the assignment.
    #[serde(default, deserialize_with = "double_option")]
    pub driver_name: Option<Option<String>>,
    /// New phone number; `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub phone_number: Option<Option<String>>,
    /// New order date as `[year]-[month]-[day]`.
    #[serde(default)]
    pub order_date: Option<String>,
    /// New shift.
    #[serde(default)]
    pub shift: Option<String>,
    /// New fabrication type.
    #[serde(default)]
    pub order_type: Option<String>,
    /// New signed-delivery-note flag.
    #[serde(default)]
    pub signed_delivery_note: Option<bool>,
    /// New total tons. Amount is recomputed when this is set.
    #[serde(default)]
    pub tons: Option<f64>,
    /// New per-size breakdown.
    #[serde(default)]
    pub breakdown: Option<Breakdown>,
    /// New lifecycle status. Crossing the active/history boundary turns
    /// the update into a move.
    #[serde(default)]
    pub status: Option<String>,
}

/// API representation of an order in either set.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrderResponse {
    /// The delivery number identity.
    pub delivery_number: String,
    /// The customer/delivery name.
    pub delivery_name: String,
    /// The ordering company.
    pub company: String,
    /// The delivery site.
    pub site: String,
    /// The assigned driver's name, if any.
    pub driver_name: Option<String>,
    /// A contact phone number, if any.
    pub phone_number: Option<String>,
    /// The order date as `[year]-[month]-[day]`.
    pub order_date: String,
    /// The shift.
    pub shift: String,
    /// The fabrication type.
    pub order_type: String,
    /// Whether a signed delivery note is on file.
    pub signed_delivery_note: bool,
    /// Total tons ordered.
    pub tons: f64,
    /// Derived amount at the flat per-ton rate.
    pub amount: f64,
    /// Per-size tonnage breakdown.
    pub breakdown: Breakdown,
    /// The lifecycle status implied by the set the order lives in.
    pub status: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last-update timestamp, RFC 3339.
    pub updated_at: String,
}

impl OrderResponse {
    pub(crate) fn from_active(order: &Order) -> Self {
        Self {
            delivery_number: order.delivery_number.value().to_string(),
            delivery_name: order.delivery_name.clone(),
            company: order.company.clone(),
            site: order.site.clone(),
            driver_name: order.driver_name.clone(),
            phone_number: order.phone_number.clone(),
            order_date: format_date(order.order_date),
            shift: order.shift.as_str().to_string(),
            order_type: order.order_type.as_str().to_string(),
            signed_delivery_note: order.signed_delivery_note,
            tons: order.tons,
            amount: order.amount,
            breakdown: order.breakdown,
            status: OrderStatus::InProgress.as_str().to_string(),
            created_at: format_timestamp(order.created_at),
            updated_at: format_timestamp(order.updated_at),
        }
    }

    pub(crate) fn from_record(record: &OrderRecord) -> Self {
        match record {
            OrderRecord::Active(order) => Self::from_active(order),
            OrderRecord::Delivered(delivered) => {
                let mut response: Self = Self::from_active(&delivered.order);
                response.status = OrderStatus::Delivered.as_str().to_string();
                response
            }
        }
    }
}

/// API representation of an order in the history set.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeliveredOrderResponse {
    /// The order fields, with status `delivered`.
    pub order: OrderResponse,
    /// When the delivery was recorded, RFC 3339.
    pub delivered_at: String,
}

impl DeliveredOrderResponse {
    pub(crate) fn from_delivered(delivered: &DeliveredOrder) -> Self {
        let mut order: OrderResponse = OrderResponse::from_active(&delivered.order);
        order.status = OrderStatus::Delivered.as_str().to_string();
        Self {
            order,
            delivered_at: format_timestamp(delivered.delivered_at),
        }
    }
}

/// API response listing the active set, newest first.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListOrdersResponse {
    /// The active orders.
    pub orders: Vec<OrderResponse>,
}

/// API response listing the history set, newest first.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListDeliveredOrdersResponse {
    /// The delivered orders.
    pub orders: Vec<DeliveredOrderResponse>,
}

/// API response for a successful order deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteOrderResponse {
    /// The deleted delivery number.
    pub delivery_number: String,
    /// A success message.
    pub message: String,
}

/// API request to create a roster driver.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateDriverRequest {
    /// The driver's name.
    pub name: String,
    /// The driver's phone number.
    pub phone_number: String,
    /// Whether the driver is available for assignment.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

/// API request to update a roster driver.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize)]
pub struct UpdateDriverRequest {
    /// New driver name.
    #[serde(default)]
    pub name: Option<String>,
    /// New phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// New active flag.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// API representation of a roster driver.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DriverResponse {
    /// The store-assigned driver id.
    pub driver_id: String,
    /// The driver's name.
    pub name: String,
    /// The driver's phone number.
    pub phone_number: String,
    /// Whether the driver is available for assignment.
    pub is_active: bool,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last-update timestamp, RFC 3339.
    pub updated_at: String,
}

impl DriverResponse {
    pub(crate) fn from_driver(driver: &Driver) -> Self {
        Self {
            driver_id: driver.driver_id.clone(),
            name: driver.name.clone(),
            phone_number: driver.phone_number.clone(),
            is_active: driver.is_active,
            created_at: format_timestamp(driver.created_at),
            updated_at: format_timestamp(driver.updated_at),
        }
    }
}

/// API response listing the driver roster.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListDriversResponse {
    /// The roster, in creation order.
    pub drivers: Vec<DriverResponse>,
}

/// API response for a successful driver deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteDriverResponse {
    /// The deleted driver id.
    pub driver_id: String,
    /// A success message.
    pub message: String,
}

/// API representation of one driver's metrics over a cycle window.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DriverMetricsResponse {
    /// The store-assigned driver id.
    pub driver_id: String,
    /// The driver's name.
    pub driver_name: String,
    /// The driver's phone number.
    pub phone_number: String,
    /// Whether the driver is available for assignment.
    pub is_active: bool,
    /// Orders matched in the window, both sets.
    pub total_orders: u32,
    /// Matched orders in the history set.
    pub completed_orders: u32,
    /// Matched orders still active.
    pub pending_orders: u32,
    /// Matched tons, rounded to two decimal places.
    pub total_tons: f64,
    /// Window start as `[year]-[month]-[day]`, inclusive.
    pub cycle_start: String,
    /// Window end as `[year]-[month]-[day]`, inclusive.
    pub cycle_end: String,
}

impl DriverMetricsResponse {
    pub(crate) fn from_metrics(metrics: &DriverMetrics) -> Self {
        Self {
            driver_id: metrics.driver_id.clone(),
            driver_name: metrics.driver_name.clone(),
            phone_number: metrics.phone_number.clone(),
            is_active: metrics.is_active,
            total_orders: metrics.total_orders,
            completed_orders: metrics.completed_orders,
            pending_orders: metrics.pending_orders,
            total_tons: metrics.total_tons,
            cycle_start: format_date(metrics.cycle_start),
            cycle_end: format_date(metrics.cycle_end),
        }
    }
}

/// API response listing metrics for every roster driver.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListDriverMetricsResponse {
    /// One entry per roster driver.
    pub drivers: Vec<DriverMetricsResponse>,
}

/// API representation of the current billing cycle window.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CycleWindowResponse {
    /// Window start as `[year]-[month]-[day]`, inclusive.
    pub start: String,
    /// Window end as `[year]-[month]-[day]`, inclusive.
    pub end: String,
}

/// Delivered tonnage for one calendar day, split by fabrication type.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DailyTonsResponse {
    /// The order date as `[year]-[month]-[day]`.
    pub date: String,
    /// Straight-bar tons delivered that day.
    pub straight_bar: f64,
    /// Cut-and-bend tons delivered that day.
    pub cut_and_bend: f64,
    /// Sum of both, rounded to two decimal places.
    pub total: f64,
}

/// API response listing per-day delivered tonnage over the current
/// cycle, oldest day first.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DailyHistoryResponse {
    /// Days with at least one delivery.
    pub days: Vec<DailyTonsResponse>,
}

/// API response with headline order counts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StatsResponse {
    /// Orders in the active set.
    pub active_orders: u32,
    /// Orders in the history set.
    pub delivered_orders: u32,
    /// Every order in either set.
    pub total_orders: u32,
}
