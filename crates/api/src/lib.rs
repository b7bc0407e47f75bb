// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Steel Track delivery tracker.
//!
//! Every operation enforces the access policy before touching the
//! store, translates wire-level strings into domain types, and
//! translates domain/core errors into the API error contract.

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

use std::str::FromStr;

use steel_track_core::{
    DriverStore, OrderStore, UpdateDriver, UpdateOrder, daily_delivered_tons, dashboard_stats,
    metrics_for_all_drivers, metrics_for_driver,
};
use steel_track_domain::{
    AccessAction, CycleWindow, DeliveryNumber, Driver, NewDriver, NewOrder, OrderRecord,
    OrderStatus, OrderType, Shift,
};
use time::{Date, OffsetDateTime};
use tracing::info;

mod actor;
mod error;
mod request_response;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use actor::{AuthenticatedActor, RoleParseError, parse_role};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use request_response::{
    CreateDriverRequest, CreateOrderRequest, CycleWindowResponse, DailyHistoryResponse,
    DailyTonsResponse, DeleteDriverResponse, DeleteOrderResponse, DeliveredOrderResponse,
    DriverMetricsResponse, DriverResponse, ListDeliveredOrdersResponse, ListDriverMetricsResponse,
    ListDriversResponse, ListOrdersResponse, OrderResponse, StatsResponse, UpdateDriverRequest,
    UpdateOrderRequest,
};

use request_response::format_date;

fn parse_wire_date(value: &str, field: &str) -> Result<Date, ApiError> {
    Date::parse(value, request_response::DATE_FORMAT).map_err(|err| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Failed to parse date '{value}': {err}"),
    })
}

fn parse_delivery_number(value: &str) -> Result<DeliveryNumber, ApiError> {
    DeliveryNumber::new(value).map_err(translate_domain_error)
}

/// Creates a new order via the API boundary.
///
/// # Errors
///
/// Returns an error if the actor may not create, a wire field fails to
/// parse, a domain rule rejects the order, or the store fails.
pub fn create_order(
    store: &mut impl OrderStore,
    request: CreateOrderRequest,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<OrderResponse, ApiError> {
    actor.authorize(AccessAction::Create, "create_order")?;

    let status: OrderStatus = match &request.status {
        Some(value) => OrderStatus::from_str(value).map_err(translate_domain_error)?,
        None => OrderStatus::InProgress,
    };
    let input: NewOrder = NewOrder {
        delivery_number: parse_delivery_number(&request.delivery_number)?,
        delivery_name: request.delivery_name,
        company: request.company,
        site: request.site,
        driver_name: request.driver_name,
        phone_number: request.phone_number,
        order_date: parse_wire_date(&request.order_date, "order_date")?,
        shift: Shift::from_str(&request.shift).map_err(translate_domain_error)?,
        order_type: OrderType::from_str(&request.order_type).map_err(translate_domain_error)?,
        signed_delivery_note: request.signed_delivery_note,
        tons: request.tons,
        breakdown: request.breakdown,
        status,
    };

    let record: OrderRecord =
        steel_track_core::create_order(store, input, now).map_err(translate_core_error)?;
    info!(
        delivery_number = %record.delivery_number().value(),
        actor = %actor.id,
        "Order created"
    );
    Ok(OrderResponse::from_record(&record))
}

/// Updates an order in place, wherever it lives.
///
/// A status change that crosses the active/history boundary is carried
/// out as a move after the field update.
///
/// # Errors
///
/// Returns an error if the actor may not edit, a wire field fails to
/// parse, the order does not exist, or the store fails.
pub fn update_order(
    store: &mut impl OrderStore,
    delivery_number: &str,
    request: UpdateOrderRequest,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<OrderResponse, ApiError> {
    actor.authorize(AccessAction::Edit, "update_order")?;

    let order_date: Option<Date> = match &request.order_date {
        Some(value) => Some(parse_wire_date(value, "order_date")?),
        None => None,
    };
    let shift: Option<Shift> = match &request.shift {
        Some(value) => Some(Shift::from_str(value).map_err(translate_domain_error)?),
        None => None,
    };
    let order_type: Option<OrderType> = match &request.order_type {
        Some(value) => Some(OrderType::from_str(value).map_err(translate_domain_error)?),
        None => None,
    };
    let status: Option<OrderStatus> = match &request.status {
        Some(value) => Some(OrderStatus::from_str(value).map_err(translate_domain_error)?),
        None => None,
    };
    let changes: UpdateOrder = UpdateOrder {
        delivery_name: request.delivery_name,
        company: request.company,
        site: request.site,
        driver_name: request.driver_name,
        phone_number: request.phone_number,
        order_date,
        shift,
        order_type,
        signed_delivery_note: request.signed_delivery_note,
        tons: request.tons,
        breakdown: request.breakdown,
        status,
    };

    let identity: DeliveryNumber = parse_delivery_number(delivery_number)?;
    let record: OrderRecord = steel_track_core::update_in_place(store, &identity, &changes, now)
        .map_err(translate_core_error)?;
    info!(delivery_number = %identity.value(), actor = %actor.id, "Order updated");
    Ok(OrderResponse::from_record(&record))
}

/// Moves an active order into the history set.
///
/// # Errors
///
/// Returns an error if the actor may not edit, the order is not in the
/// active set, or the store fails.
pub fn mark_order_delivered(
    store: &mut impl OrderStore,
    delivery_number: &str,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<DeliveredOrderResponse, ApiError> {
    actor.authorize(AccessAction::Edit, "mark_order_delivered")?;

    let identity: DeliveryNumber = parse_delivery_number(delivery_number)?;
    let delivered = steel_track_core::mark_delivered(store, &identity, now)
        .map_err(translate_core_error)?;
    info!(delivery_number = %identity.value(), actor = %actor.id, "Order delivered");
    Ok(DeliveredOrderResponse::from_delivered(&delivered))
}

/// Moves a history order back into the active set.
///
/// # Errors
///
/// Returns an error if the actor may not edit, the order is not in the
/// history set, or the store fails.
pub fn reactivate_order(
    store: &mut impl OrderStore,
    delivery_number: &str,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<OrderResponse, ApiError> {
    actor.authorize(AccessAction::Edit, "reactivate_order")?;

    let identity: DeliveryNumber = parse_delivery_number(delivery_number)?;
    let order =
        steel_track_core::reactivate(store, &identity, now).map_err(translate_core_error)?;
    info!(delivery_number = %identity.value(), actor = %actor.id, "Order reactivated");
    Ok(OrderResponse::from_active(&order))
}

/// Deletes an order from whichever set holds it.
///
/// # Errors
///
/// Returns an error if the actor may not delete, the order does not
/// exist, or the store fails.
pub fn delete_order(
    store: &mut impl OrderStore,
    delivery_number: &str,
    actor: &AuthenticatedActor,
) -> Result<DeleteOrderResponse, ApiError> {
    actor.authorize(AccessAction::Delete, "delete_order")?;

    let identity: DeliveryNumber = parse_delivery_number(delivery_number)?;
    steel_track_core::delete_order(store, &identity).map_err(translate_core_error)?;
    info!(delivery_number = %identity.value(), actor = %actor.id, "Order deleted");
    Ok(DeleteOrderResponse {
        delivery_number: identity.value().to_string(),
        message: format!("Deleted order '{}'", identity.value()),
    })
}

/// Lists the active set, newest first.
///
/// # Errors
///
/// Returns an error if the actor may not view or the store fails.
pub fn list_active_orders(
    store: &mut impl OrderStore,
    actor: &AuthenticatedActor,
) -> Result<ListOrdersResponse, ApiError> {
    actor.authorize(AccessAction::View, "list_active_orders")?;

    let orders = store
        .list_active()
        .map_err(|err| translate_core_error(err.into()))?;
    Ok(ListOrdersResponse {
        orders: orders.iter().map(OrderResponse::from_active).collect(),
    })
}

/// Lists the history set, newest first.
///
/// # Errors
///
/// Returns an error if the actor may not view or the store fails.
pub fn list_delivered_orders(
    store: &mut impl OrderStore,
    actor: &AuthenticatedActor,
) -> Result<ListDeliveredOrdersResponse, ApiError> {
    actor.authorize(AccessAction::View, "list_delivered_orders")?;

    let orders = store
        .list_delivered()
        .map_err(|err| translate_core_error(err.into()))?;
    Ok(ListDeliveredOrdersResponse {
        orders: orders
            .iter()
            .map(DeliveredOrderResponse::from_delivered)
            .collect(),
    })
}

/// Sums delivered tons per day over the cycle containing `today`.
///
/// # Errors
///
/// Returns an error if the actor may not view or the store fails.
pub fn daily_delivered_history(
    store: &mut impl OrderStore,
    actor: &AuthenticatedActor,
    today: Date,
) -> Result<DailyHistoryResponse, ApiError> {
    actor.authorize(AccessAction::View, "daily_delivered_history")?;

    let window: CycleWindow = CycleWindow::containing(today);
    let days = daily_delivered_tons(store, window).map_err(translate_core_error)?;
    Ok(DailyHistoryResponse {
        days: days
            .iter()
            .map(|(date, tons)| DailyTonsResponse {
                date: format_date(*date),
                straight_bar: tons.straight_bar,
                cut_and_bend: tons.cut_and_bend,
                total: tons.total,
            })
            .collect(),
    })
}

/// Counts orders in each set.
///
/// # Errors
///
/// Returns an error if the actor may not view or the store fails.
pub fn stats(
    store: &mut impl OrderStore,
    actor: &AuthenticatedActor,
) -> Result<StatsResponse, ApiError> {
    actor.authorize(AccessAction::View, "stats")?;

    let counts = dashboard_stats(store).map_err(translate_core_error)?;
    Ok(StatsResponse {
        active_orders: counts.active_orders,
        delivered_orders: counts.delivered_orders,
        total_orders: counts.total_orders,
    })
}

/// Creates a roster driver via the API boundary.
///
/// # Errors
///
/// Returns an error if the actor may not create, the name is empty, or
/// the store fails.
pub fn create_driver(
    store: &mut impl DriverStore,
    request: CreateDriverRequest,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<DriverResponse, ApiError> {
    actor.authorize(AccessAction::Create, "create_driver")?;

    let input: NewDriver = NewDriver {
        name: request.name,
        phone_number: request.phone_number,
        is_active: request.is_active,
    };
    let driver: Driver =
        steel_track_core::create_driver(store, &input, now).map_err(translate_core_error)?;
    info!(driver_id = %driver.driver_id, actor = %actor.id, "Driver created");
    Ok(DriverResponse::from_driver(&driver))
}

/// Applies a change set to a roster driver.
///
/// # Errors
///
/// Returns an error if the actor may not edit, the driver does not
/// exist, the new name is empty, or the store fails.
pub fn update_driver(
    store: &mut impl DriverStore,
    driver_id: &str,
    request: UpdateDriverRequest,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<DriverResponse, ApiError> {
    actor.authorize(AccessAction::Edit, "update_driver")?;

    let changes: UpdateDriver = UpdateDriver {
        name: request.name,
        phone_number: request.phone_number,
        is_active: request.is_active,
    };
    let driver: Driver = steel_track_core::update_driver(store, driver_id, &changes, now)
        .map_err(translate_core_error)?;
    info!(driver_id = %driver.driver_id, actor = %actor.id, "Driver updated");
    Ok(DriverResponse::from_driver(&driver))
}

/// Deletes a roster driver.
///
/// Orders referencing the driver keep their denormalized name.
///
/// # Errors
///
/// Returns an error if the actor may not delete, the driver does not
/// exist, or the store fails.
pub fn delete_driver(
    store: &mut impl DriverStore,
    driver_id: &str,
    actor: &AuthenticatedActor,
) -> Result<DeleteDriverResponse, ApiError> {
    actor.authorize(AccessAction::Delete, "delete_driver")?;

    steel_track_core::delete_driver(store, driver_id).map_err(translate_core_error)?;
    info!(driver_id = %driver_id, actor = %actor.id, "Driver deleted");
    Ok(DeleteDriverResponse {
        driver_id: driver_id.to_string(),
        message: format!("Deleted driver '{driver_id}'"),
    })
}

/// Lists the driver roster in creation order.
///
/// # Errors
///
/// Returns an error if the actor may not view or the store fails.
pub fn list_drivers(
    store: &mut impl DriverStore,
    actor: &AuthenticatedActor,
) -> Result<ListDriversResponse, ApiError> {
    actor.authorize(AccessAction::View, "list_drivers")?;

    let roster = store
        .list_drivers()
        .map_err(|err| translate_core_error(err.into()))?;
    Ok(ListDriversResponse {
        drivers: roster.iter().map(DriverResponse::from_driver).collect(),
    })
}

/// Computes one driver's metrics over the cycle containing `today`.
///
/// # Errors
///
/// Returns an error if the actor may not view, the driver does not
/// exist, or the store fails.
pub fn driver_metrics<S>(
    store: &mut S,
    driver_id: &str,
    actor: &AuthenticatedActor,
    today: Date,
) -> Result<DriverMetricsResponse, ApiError>
where
    S: OrderStore + DriverStore,
{
    actor.authorize(AccessAction::View, "driver_metrics")?;

    let Some(driver) = store
        .get_driver(driver_id)
        .map_err(|err| translate_core_error(err.into()))?
    else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Driver"),
            message: format!("No driver with id '{driver_id}'"),
        });
    };

    let window: CycleWindow = CycleWindow::containing(today);
    let metrics =
        metrics_for_driver(store, &driver, window).map_err(translate_core_error)?;
    Ok(DriverMetricsResponse::from_metrics(&metrics))
}

/// Computes metrics for every roster driver over the cycle containing
/// `today`.
///
/// # Errors
///
/// Returns an error if the actor may not view or the roster cannot be
/// listed.
pub fn all_driver_metrics<S>(
    store: &mut S,
    actor: &AuthenticatedActor,
    today: Date,
) -> Result<ListDriverMetricsResponse, ApiError>
where
    S: OrderStore + DriverStore,
{
    actor.authorize(AccessAction::View, "all_driver_metrics")?;

    let window: CycleWindow = CycleWindow::containing(today);
    let metrics = metrics_for_all_drivers(store, window).map_err(translate_core_error)?;
    Ok(ListDriverMetricsResponse {
        drivers: metrics
            .iter()
            .map(DriverMetricsResponse::from_metrics)
            .collect(),
    })
}

/// Returns the billing cycle window containing `today`.
///
/// # Errors
///
/// Returns an error if the actor may not view.
pub fn current_cycle(
    actor: &AuthenticatedActor,
    today: Date,
) -> Result<CycleWindowResponse, ApiError> {
    actor.authorize(AccessAction::View, "current_cycle")?;

    let window: CycleWindow = CycleWindow::containing(today);
    Ok(CycleWindowResponse {
        start: format_date(window.start),
        end: format_date(window.end),
    })
}
