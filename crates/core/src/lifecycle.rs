// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::OrderStore;
use steel_track_domain::{
    Breakdown, DeliveredOrder, DeliveryNumber, DomainError, NewOrder, Order, OrderRecord,
    OrderStatus, OrderType, Shift, UNIT_RATE_PER_TON, round2, validate_breakdown_consistency,
    validate_order_fields,
};
use time::{Date, OffsetDateTime};

/// A change set for updating an order in place.
///
/// `None` leaves a field untouched. The nullable text fields use a
/// nested `Option` so a caller can clear them explicitly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateOrder {
    /// New customer/delivery name.
    pub delivery_name: Option<String>,
    /// New ordering company.
    pub company: Option<String>,
    /// New delivery site.
    pub site: Option<String>,
    /// New driver name; `Some(None)` clears the assignment.
    pub driver_name: Option<Option<String>>,
    /// New phone number; `Some(None)` clears it.
    pub phone_number: Option<Option<String>>,
    /// New order date.
    pub order_date: Option<Date>,
    /// New shift.
    pub shift: Option<Shift>,
    /// New fabrication type.
    pub order_type: Option<OrderType>,
    /// New signed-delivery-note flag.
    pub signed_delivery_note: Option<bool>,
    /// New total tons. Amount is recomputed when this is set.
    pub tons: Option<f64>,
    /// New per-size breakdown. Consistency with tons is NOT re-checked
    /// on update; that check runs at creation only.
    pub breakdown: Option<Breakdown>,
    /// New lifecycle status. Crossing the active/history boundary turns
    /// the update into a move.
    pub status: Option<OrderStatus>,
}

impl UpdateOrder {
    fn apply_fields(&self, order: &mut Order, now: OffsetDateTime) {
        if let Some(delivery_name) = &self.delivery_name {
            order.delivery_name.clone_from(delivery_name);
        }
        if let Some(company) = &self.company {
            order.company.clone_from(company);
        }
        if let Some(site) = &self.site {
            order.site.clone_from(site);
        }
        if let Some(driver_name) = &self.driver_name {
            order.driver_name.clone_from(driver_name);
        }
        if let Some(phone_number) = &self.phone_number {
            order.phone_number.clone_from(phone_number);
        }
        if let Some(order_date) = self.order_date {
            order.order_date = order_date;
        }
        if let Some(shift) = self.shift {
            order.shift = shift;
        }
        if let Some(order_type) = self.order_type {
            order.order_type = order_type;
        }
        if let Some(signed_delivery_note) = self.signed_delivery_note {
            order.signed_delivery_note = signed_delivery_note;
        }
        if let Some(tons) = self.tons {
            order.tons = tons;
            order.amount = round2(tons * UNIT_RATE_PER_TON);
        }
        if let Some(breakdown) = self.breakdown {
            order.breakdown = breakdown;
        }
        order.updated_at = now;
    }
}

/// Creates a new order in the set its requested status selects.
///
/// The delivery number must be unique across BOTH sets. A requested
/// `Delivered` status places the order directly into the history set
/// with `delivered_at = now`; otherwise it lands in the active set.
///
/// # Arguments
///
/// * `store` - The order repository
/// * `input` - The caller-supplied order fields
/// * `now` - The creation moment (UTC)
///
/// # Returns
///
/// The created record, tagged by the set it landed in.
///
/// # Errors
///
/// Returns an error if:
/// - A required field is missing or tons are non-positive
/// - A non-zero breakdown disagrees with tons beyond the tolerance
/// - The delivery number already exists in either set
/// - The store fails
pub fn create_order(
    store: &mut impl OrderStore,
    input: NewOrder,
    now: OffsetDateTime,
) -> Result<OrderRecord, CoreError> {
    validate_order_fields(&input)?;
    validate_breakdown_consistency(input.tons, &input.breakdown)?;

    let delivery_number: &DeliveryNumber = &input.delivery_number;
    if store.get_active(delivery_number)?.is_some()
        || store.get_delivered(delivery_number)?.is_some()
    {
        return Err(CoreError::DomainViolation(
            DomainError::DuplicateDeliveryNumber {
                delivery_number: delivery_number.value().to_string(),
            },
        ));
    }

    match input.status {
        OrderStatus::InProgress => {
            let order: Order = Order::from_new(input, now);
            store.insert_active(&order)?;
            Ok(OrderRecord::Active(order))
        }
        OrderStatus::Delivered => {
            let delivered: DeliveredOrder = DeliveredOrder::from_new(input, now);
            store.insert_delivered(&delivered)?;
            Ok(OrderRecord::Delivered(delivered))
        }
    }
}

/// Moves an active order into the history set.
///
/// The delivered copy is written to history FIRST, then the active row
/// is deleted. If the history write fails the active row is untouched;
/// if the delete fails the record transiently exists in both sets and
/// the store error is surfaced rather than silently repaired — a retry
/// converges because the history write replaces.
///
/// # Errors
///
/// Returns `DomainError::OrderNotFound` if the delivery number is not
/// in the active set, or the store error.
pub fn mark_delivered(
    store: &mut impl OrderStore,
    delivery_number: &DeliveryNumber,
    now: OffsetDateTime,
) -> Result<DeliveredOrder, CoreError> {
    let Some(order) = store.get_active(delivery_number)? else {
        return Err(CoreError::DomainViolation(DomainError::OrderNotFound {
            delivery_number: delivery_number.value().to_string(),
        }));
    };

    let delivered: DeliveredOrder = DeliveredOrder::from_active(order, now);
    store.insert_delivered(&delivered)?;
    store.delete_active(delivery_number)?;
    Ok(delivered)
}

/// Moves a history order back into the active set.
///
/// The order returns as `InProgress` with `delivered_at` cleared; every
/// other field — including the original order date — is preserved. The
/// active insert happens before the history delete, the same
/// destination-first ordering as [`mark_delivered`].
///
/// # Errors
///
/// Returns `DomainError::OrderNotFound` if the delivery number is not
/// in the history set, or the store error.
pub fn reactivate(
    store: &mut impl OrderStore,
    delivery_number: &DeliveryNumber,
    now: OffsetDateTime,
) -> Result<Order, CoreError> {
    let Some(delivered) = store.get_delivered(delivery_number)? else {
        return Err(CoreError::DomainViolation(DomainError::OrderNotFound {
            delivery_number: delivery_number.value().to_string(),
        }));
    };

    let order: Order = delivered.into_active(now);
    store.insert_active(&order)?;
    store.delete_delivered(delivery_number)?;
    Ok(order)
}

/// Applies a change set to whichever set holds the delivery number.
///
/// A status change that crosses the active/history boundary performs
/// the corresponding move ([`mark_delivered`] or [`reactivate`]) after
/// the field changes are written; a status matching the current set is
/// a plain in-place update.
///
/// # Errors
///
/// Returns `DomainError::OrderNotFound` if neither set holds the
/// delivery number, or the store error.
pub fn update_in_place(
    store: &mut impl OrderStore,
    delivery_number: &DeliveryNumber,
    changes: &UpdateOrder,
    now: OffsetDateTime,
) -> Result<OrderRecord, CoreError> {
    if let Some(mut order) = store.get_active(delivery_number)? {
        changes.apply_fields(&mut order, now);
        store.update_active(&order)?;
        if changes.status == Some(OrderStatus::Delivered) {
            let delivered: DeliveredOrder = mark_delivered(store, delivery_number, now)?;
            return Ok(OrderRecord::Delivered(delivered));
        }
        return Ok(OrderRecord::Active(order));
    }

    if let Some(mut delivered) = store.get_delivered(delivery_number)? {
        changes.apply_fields(&mut delivered.order, now);
        store.update_delivered(&delivered)?;
        if changes.status == Some(OrderStatus::InProgress) {
            let order: Order = reactivate(store, delivery_number, now)?;
            return Ok(OrderRecord::Active(order));
        }
        return Ok(OrderRecord::Delivered(delivered));
    }

    Err(CoreError::DomainViolation(DomainError::OrderNotFound {
        delivery_number: delivery_number.value().to_string(),
    }))
}

/// Deletes an order from whichever set holds it.
///
/// # Errors
///
/// Returns `DomainError::OrderNotFound` when the delivery number is
/// absent from both sets — never a silent success — or the store error.
pub fn delete_order(
    store: &mut impl OrderStore,
    delivery_number: &DeliveryNumber,
) -> Result<(), CoreError> {
    if store.delete_active(delivery_number)? {
        return Ok(());
    }
    if store.delete_delivered(delivery_number)? {
        return Ok(());
    }
    Err(CoreError::DomainViolation(DomainError::OrderNotFound {
        delivery_number: delivery_number.value().to_string(),
    }))
}
