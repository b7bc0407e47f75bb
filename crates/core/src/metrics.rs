// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::{DriverStore, OrderStore};
use std::collections::BTreeMap;
use steel_track_domain::{
    CycleWindow, Driver, DriverMetrics, OrderRecord, OrderStatus, OrderType, round2,
};
use time::Date;
use tracing::warn;

/// Delivered tons for one calendar day, split by fabrication type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailyTons {
    /// Straight-bar tons delivered that day.
    pub straight_bar: f64,
    /// Cut-and-bend tons delivered that day.
    pub cut_and_bend: f64,
    /// Sum of both, rounded to two decimal places.
    pub total: f64,
}

/// Headline counts over both order sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    /// Orders in the active set.
    pub active_orders: u32,
    /// Orders in the history set.
    pub delivered_orders: u32,
    /// Every order in either set.
    pub total_orders: u32,
}

fn zero_metrics(driver: &Driver, window: CycleWindow) -> DriverMetrics {
    DriverMetrics {
        driver_id: driver.driver_id.clone(),
        driver_name: driver.name.clone(),
        phone_number: driver.phone_number.clone(),
        is_active: driver.is_active,
        total_orders: 0,
        completed_orders: 0,
        pending_orders: 0,
        total_tons: 0.0,
        cycle_start: window.start,
        cycle_end: window.end,
    }
}

/// Computes one driver's order metrics over a date window.
///
/// Orders from both sets are matched by exact driver-name string and an
/// inclusive order-date range. Total tons are rounded to two decimal
/// places after summation.
///
/// # Errors
///
/// Returns the store error if the order scan fails.
pub fn metrics_for_driver(
    store: &mut impl OrderStore,
    driver: &Driver,
    window: CycleWindow,
) -> Result<DriverMetrics, CoreError> {
    let orders: Vec<OrderRecord> = store.orders_for_driver(&driver.name, window)?;

    let total_orders: u32 = u32::try_from(orders.len()).unwrap_or(u32::MAX);
    let completed_orders: u32 = u32::try_from(
        orders
            .iter()
            .filter(|record| record.status() == OrderStatus::Delivered)
            .count(),
    )
    .unwrap_or(u32::MAX);
    let total_tons: f64 = round2(orders.iter().map(OrderRecord::tons).sum());

    Ok(DriverMetrics {
        driver_id: driver.driver_id.clone(),
        driver_name: driver.name.clone(),
        phone_number: driver.phone_number.clone(),
        is_active: driver.is_active,
        total_orders,
        completed_orders,
        pending_orders: total_orders - completed_orders,
        total_tons,
        cycle_start: window.start,
        cycle_end: window.end,
    })
}

/// Computes metrics for every roster driver over a date window.
///
/// Every roster driver appears exactly once; a driver with no matched
/// orders carries zeros. Orders whose driver name matches no roster
/// entry are excluded. A store failure while computing one driver's
/// metrics degrades that driver to zeros and never aborts the
/// aggregation; only the roster listing itself is fatal.
///
/// # Errors
///
/// Returns the store error if the roster cannot be listed.
pub fn metrics_for_all_drivers<S>(
    store: &mut S,
    window: CycleWindow,
) -> Result<Vec<DriverMetrics>, CoreError>
where
    S: OrderStore + DriverStore,
{
    let roster: Vec<Driver> = store.list_drivers()?;

    let mut results: Vec<DriverMetrics> = Vec::with_capacity(roster.len());
    for driver in &roster {
        match metrics_for_driver(store, driver, window) {
            Ok(metrics) => results.push(metrics),
            Err(err) => {
                warn!(
                    driver_id = %driver.driver_id,
                    driver_name = %driver.name,
                    error = %err,
                    "Driver metrics degraded to zeros after store failure"
                );
                results.push(zero_metrics(driver, window));
            }
        }
    }
    Ok(results)
}

/// Sums delivered tons per order date over a window, split by
/// fabrication type.
///
/// Only the history set contributes. Days with no deliveries are
/// absent from the map.
///
/// # Errors
///
/// Returns the store error if the history scan fails.
pub fn daily_delivered_tons(
    store: &mut impl OrderStore,
    window: CycleWindow,
) -> Result<BTreeMap<Date, DailyTons>, CoreError> {
    let mut days: BTreeMap<Date, DailyTons> = BTreeMap::new();

    for delivered in store.list_delivered()? {
        let order_date: Date = delivered.order.order_date;
        if !window.contains(order_date) {
            continue;
        }
        let entry: &mut DailyTons = days.entry(order_date).or_default();
        match delivered.order.order_type {
            OrderType::StraightBar => entry.straight_bar += delivered.order.tons,
            OrderType::CutAndBend => entry.cut_and_bend += delivered.order.tons,
        }
    }

    for entry in days.values_mut() {
        entry.straight_bar = round2(entry.straight_bar);
        entry.cut_and_bend = round2(entry.cut_and_bend);
        entry.total = round2(entry.straight_bar + entry.cut_and_bend);
    }
    Ok(days)
}

/// Counts orders in each set.
///
/// # Errors
///
/// Returns the store error if either scan fails.
pub fn dashboard_stats(store: &mut impl OrderStore) -> Result<DashboardStats, CoreError> {
    let active_orders: u32 = u32::try_from(store.list_active()?.len()).unwrap_or(u32::MAX);
    let delivered_orders: u32 = u32::try_from(store.list_delivered()?.len()).unwrap_or(u32::MAX);
    Ok(DashboardStats {
        active_orders,
        delivered_orders,
        total_orders: active_orders + delivered_orders,
    })
}
