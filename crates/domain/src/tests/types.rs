// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BarSize, Breakdown, DeliveredOrder, DeliveryNumber, DomainError, NewOrder, Order, OrderRecord,
    OrderStatus, OrderType, Shift, UNIT_RATE_PER_TON, round2,
};
use std::str::FromStr;
use time::macros::{date, datetime};

fn create_test_new_order(delivery_number: &str) -> NewOrder {
    NewOrder {
        delivery_number: DeliveryNumber::new(delivery_number).unwrap(),
        delivery_name: String::from("Al Noor Towers"),
        company: String::from("Emirates Steel"),
        site: String::from("Site A"),
        driver_name: Some(String::from("Ahmed Hassan")),
        phone_number: Some(String::from("+971501234567")),
        order_date: date!(2026 - 03 - 10),
        shift: Shift::Morning,
        order_type: OrderType::StraightBar,
        signed_delivery_note: false,
        tons: 12.5,
        breakdown: Breakdown::default(),
        status: OrderStatus::InProgress,
    }
}

#[test]
fn test_delivery_number_creation() {
    let dn: DeliveryNumber = DeliveryNumber::new("DN-001").unwrap();
    assert_eq!(dn.value(), "DN-001");
    assert_eq!(format!("{dn}"), "DN-001");
}

#[test]
fn test_delivery_number_rejects_empty() {
    let result: Result<DeliveryNumber, DomainError> = DeliveryNumber::new("");
    assert!(matches!(result, Err(DomainError::EmptyDeliveryNumber)));
}

#[test]
fn test_delivery_number_is_case_sensitive() {
    let lower: DeliveryNumber = DeliveryNumber::new("dn-001").unwrap();
    let upper: DeliveryNumber = DeliveryNumber::new("DN-001").unwrap();
    assert_ne!(lower, upper);
}

#[test]
fn test_delivery_number_preserves_whitespace_and_specials() {
    let dn: DeliveryNumber = DeliveryNumber::new(" DN 001/#A ").unwrap();
    assert_eq!(dn.value(), " DN 001/#A ");
}

#[test]
fn test_order_status_round_trip() {
    assert_eq!(OrderStatus::InProgress.as_str(), "in-progress");
    assert_eq!(OrderStatus::Delivered.as_str(), "delivered");
    assert_eq!(
        OrderStatus::from_str("in-progress").unwrap(),
        OrderStatus::InProgress
    );
    assert_eq!(
        OrderStatus::from_str("delivered").unwrap(),
        OrderStatus::Delivered
    );
}

#[test]
fn test_order_status_rejects_legacy_values() {
    for legacy in ["pending", "delayed", "cancelled", ""] {
        let result: Result<OrderStatus, DomainError> = OrderStatus::from_str(legacy);
        assert!(matches!(result, Err(DomainError::InvalidStatus(_))));
    }
}

#[test]
fn test_shift_parse() {
    assert_eq!(Shift::from_str("morning").unwrap(), Shift::Morning);
    assert_eq!(Shift::from_str("night").unwrap(), Shift::Night);
    assert!(matches!(
        Shift::from_str("evening"),
        Err(DomainError::InvalidShift(_))
    ));
}

#[test]
fn test_order_type_parse() {
    assert_eq!(
        OrderType::from_str("straight-bar").unwrap(),
        OrderType::StraightBar
    );
    assert_eq!(
        OrderType::from_str("cut-and-bend").unwrap(),
        OrderType::CutAndBend
    );
    assert!(matches!(
        OrderType::from_str("coil"),
        Err(DomainError::InvalidOrderType(_))
    ));
}

#[test]
fn test_bar_size_covers_all_nine_diameters() {
    let expected: [&str; 9] = [
        "8mm", "10mm", "12mm", "14mm", "16mm", "18mm", "20mm", "25mm", "32mm",
    ];
    for (size, name) in BarSize::ALL.iter().zip(expected) {
        assert_eq!(size.as_str(), name);
        assert_eq!(BarSize::from_str(name).unwrap(), *size);
    }
    assert!(matches!(
        BarSize::from_str("9mm"),
        Err(DomainError::InvalidBarSize(_))
    ));
}

#[test]
fn test_breakdown_total_and_is_zero() {
    let empty: Breakdown = Breakdown::default();
    assert!(empty.is_zero());
    assert_eq!(empty.total(), 0.0);

    let breakdown: Breakdown = Breakdown {
        mm8: 1.5,
        mm16: 3.0,
        mm32: 0.5,
        ..Breakdown::default()
    };
    assert!(!breakdown.is_zero());
    assert!((breakdown.total() - 5.0).abs() < f64::EPSILON);
}

#[test]
fn test_round2() {
    assert!((round2(1.2345) - 1.23).abs() < f64::EPSILON);
    assert!((round2(12.3456) - 12.35).abs() < f64::EPSILON);
    assert_eq!(round2(0.0), 0.0);
}

#[test]
fn test_order_from_new_derives_amount() {
    let now = datetime!(2026-03-10 08:00:00 UTC);
    let order: Order = Order::from_new(create_test_new_order("DN-001"), now);

    assert!((order.amount - 12.5 * UNIT_RATE_PER_TON).abs() < f64::EPSILON);
    assert_eq!(order.created_at, now);
    assert_eq!(order.updated_at, now);
    assert_eq!(order.order_date, date!(2026 - 03 - 10));
}

#[test]
fn test_delivered_order_from_active_stamps_delivery_moment() {
    let created = datetime!(2026-03-10 08:00:00 UTC);
    let delivered_at = datetime!(2026-03-12 17:30:00 UTC);
    let order: Order = Order::from_new(create_test_new_order("DN-002"), created);

    let delivered: DeliveredOrder = DeliveredOrder::from_active(order, delivered_at);
    assert_eq!(delivered.delivered_at, delivered_at);
    assert_eq!(delivered.order.updated_at, delivered_at);
    assert_eq!(delivered.order.created_at, created);
    // Original order date survives the transition.
    assert_eq!(delivered.order.order_date, date!(2026 - 03 - 10));
}

#[test]
fn test_delivered_order_into_active_preserves_order_date() {
    let created = datetime!(2026-03-10 08:00:00 UTC);
    let delivered_at = datetime!(2026-03-12 17:30:00 UTC);
    let reactivated_at = datetime!(2026-03-14 09:00:00 UTC);

    let order: Order = Order::from_new(create_test_new_order("DN-003"), created);
    let delivered: DeliveredOrder = DeliveredOrder::from_active(order, delivered_at);
    let active: Order = delivered.into_active(reactivated_at);

    assert_eq!(active.order_date, date!(2026 - 03 - 10));
    assert_eq!(active.updated_at, reactivated_at);
    assert_eq!(active.created_at, created);
}

#[test]
fn test_order_record_status_follows_set_membership() {
    let now = datetime!(2026-03-10 08:00:00 UTC);
    let order: Order = Order::from_new(create_test_new_order("DN-004"), now);

    let active: OrderRecord = OrderRecord::Active(order.clone());
    assert_eq!(active.status(), OrderStatus::InProgress);
    assert_eq!(active.delivery_number().value(), "DN-004");
    assert_eq!(active.driver_name(), Some("Ahmed Hassan"));

    let delivered: OrderRecord =
        OrderRecord::Delivered(DeliveredOrder::from_active(order, now));
    assert_eq!(delivered.status(), OrderStatus::Delivered);
    assert!((delivered.tons() - 12.5).abs() < f64::EPSILON);
}
