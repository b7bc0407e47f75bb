// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    create_order, daily_delivered_tons, dashboard_stats, mark_delivered, metrics_for_all_drivers,
    metrics_for_driver,
};
use steel_track_domain::{CycleWindow, DeliveryNumber, NewOrder, OrderStatus, OrderType};
use time::macros::date;

use super::helpers::{
    MemoryDriverStore, MemoryOrderStore, MemoryStore, create_test_new_driver,
    create_test_new_order, create_test_new_order_for_driver, test_now,
};
use crate::store::DriverStore;

fn march_window() -> CycleWindow {
    // 25 Feb - 25 Mar 2026
    CycleWindow::containing(date!(2026 - 03 - 15))
}

fn seed_order(store: &mut MemoryOrderStore, input: NewOrder) {
    create_order(store, input, test_now()).unwrap();
}

#[test]
fn test_metrics_for_driver_counts_window_orders() {
    let mut orders = MemoryOrderStore::default();
    let mut drivers = MemoryDriverStore::default();
    let driver = drivers
        .insert_driver(&create_test_new_driver("Ahmed Hassan"), test_now())
        .unwrap();

    // Three in the window, one delivered.
    seed_order(
        &mut orders,
        create_test_new_order_for_driver("DN-100", "Ahmed Hassan", date!(2026 - 02 - 25), 10.0),
    );
    seed_order(
        &mut orders,
        create_test_new_order_for_driver("DN-101", "Ahmed Hassan", date!(2026 - 03 - 10), 5.25),
    );
    seed_order(
        &mut orders,
        create_test_new_order_for_driver("DN-102", "Ahmed Hassan", date!(2026 - 03 - 25), 4.5),
    );
    mark_delivered(
        &mut orders,
        &DeliveryNumber::new("DN-101").unwrap(),
        test_now(),
    )
    .unwrap();

    // Outside the window.
    seed_order(
        &mut orders,
        create_test_new_order_for_driver("DN-103", "Ahmed Hassan", date!(2026 - 02 - 24), 50.0),
    );
    seed_order(
        &mut orders,
        create_test_new_order_for_driver("DN-104", "Ahmed Hassan", date!(2026 - 03 - 26), 50.0),
    );

    // Another driver's order.
    seed_order(
        &mut orders,
        create_test_new_order_for_driver("DN-105", "Omar Khalid", date!(2026 - 03 - 10), 50.0),
    );

    let metrics = metrics_for_driver(&mut orders, &driver, march_window()).unwrap();

    assert_eq!(metrics.total_orders, 3);
    assert_eq!(metrics.completed_orders, 1);
    assert_eq!(metrics.pending_orders, 2);
    assert!((metrics.total_tons - 19.75).abs() < f64::EPSILON);
    assert_eq!(metrics.cycle_start, date!(2026 - 02 - 25));
    assert_eq!(metrics.cycle_end, date!(2026 - 03 - 25));
}

#[test]
fn test_metrics_driver_name_match_is_case_sensitive() {
    let mut orders = MemoryOrderStore::default();
    let mut drivers = MemoryDriverStore::default();
    let driver = drivers
        .insert_driver(&create_test_new_driver("Ahmed Hassan"), test_now())
        .unwrap();

    seed_order(
        &mut orders,
        create_test_new_order_for_driver("DN-110", "ahmed hassan", date!(2026 - 03 - 10), 9.0),
    );

    let metrics = metrics_for_driver(&mut orders, &driver, march_window()).unwrap();
    assert_eq!(metrics.total_orders, 0);
    assert!((metrics.total_tons - 0.0).abs() < f64::EPSILON);
}

#[test]
fn test_metrics_for_all_drivers_includes_orderless_drivers_with_zeros() {
    let mut store = MemoryStore::default();
    store
        .drivers
        .insert_driver(&create_test_new_driver("Ahmed Hassan"), test_now())
        .unwrap();
    store
        .drivers
        .insert_driver(&create_test_new_driver("Omar Khalid"), test_now())
        .unwrap();

    seed_order(
        &mut store.orders,
        create_test_new_order_for_driver("DN-120", "Ahmed Hassan", date!(2026 - 03 - 10), 7.0),
    );

    let all = metrics_for_all_drivers(&mut store, march_window()).unwrap();
    assert_eq!(all.len(), 2);

    let ahmed = all.iter().find(|m| m.driver_name == "Ahmed Hassan").unwrap();
    assert_eq!(ahmed.total_orders, 1);
    let omar = all.iter().find(|m| m.driver_name == "Omar Khalid").unwrap();
    assert_eq!(omar.total_orders, 0);
    assert!((omar.total_tons - 0.0).abs() < f64::EPSILON);
}

#[test]
fn test_metrics_excludes_orders_with_unmatched_driver_names() {
    let mut store = MemoryStore::default();
    store
        .drivers
        .insert_driver(&create_test_new_driver("Ahmed Hassan"), test_now())
        .unwrap();

    seed_order(
        &mut store.orders,
        create_test_new_order_for_driver("DN-130", "No Such Driver", date!(2026 - 03 - 10), 40.0),
    );

    let all = metrics_for_all_drivers(&mut store, march_window()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].total_orders, 0);
}

#[test]
fn test_metrics_store_failure_degrades_one_driver_to_zeros() {
    let mut store = MemoryStore::default();
    store
        .drivers
        .insert_driver(&create_test_new_driver("Ahmed Hassan"), test_now())
        .unwrap();
    store
        .drivers
        .insert_driver(&create_test_new_driver("Omar Khalid"), test_now())
        .unwrap();

    seed_order(
        &mut store.orders,
        create_test_new_order_for_driver("DN-140", "Ahmed Hassan", date!(2026 - 03 - 10), 7.0),
    );
    seed_order(
        &mut store.orders,
        create_test_new_order_for_driver("DN-141", "Omar Khalid", date!(2026 - 03 - 10), 3.0),
    );
    store.orders.fail_scans_for_driver = Some(String::from("Omar Khalid"));

    let all = metrics_for_all_drivers(&mut store, march_window()).unwrap();
    assert_eq!(all.len(), 2);

    let ahmed = all.iter().find(|m| m.driver_name == "Ahmed Hassan").unwrap();
    assert_eq!(ahmed.total_orders, 1);
    let omar = all.iter().find(|m| m.driver_name == "Omar Khalid").unwrap();
    assert_eq!(omar.total_orders, 0);
    assert!((omar.total_tons - 0.0).abs() < f64::EPSILON);
}

#[test]
fn test_metrics_roster_listing_failure_is_fatal() {
    let mut store = MemoryStore {
        drivers: MemoryDriverStore {
            fail_listing: true,
            ..MemoryDriverStore::default()
        },
        ..MemoryStore::default()
    };

    let result = metrics_for_all_drivers(&mut store, march_window());
    assert!(result.is_err());
}

#[test]
fn test_daily_delivered_tons_splits_by_order_type() {
    let mut orders = MemoryOrderStore::default();

    let mut straight: NewOrder =
        create_test_new_order("DN-150", date!(2026 - 03 - 10), 4.125);
    straight.status = OrderStatus::Delivered;
    seed_order(&mut orders, straight);

    let mut bent: NewOrder = create_test_new_order("DN-151", date!(2026 - 03 - 10), 2.125);
    bent.order_type = OrderType::CutAndBend;
    bent.status = OrderStatus::Delivered;
    seed_order(&mut orders, bent);

    // Active orders never contribute.
    seed_order(
        &mut orders,
        create_test_new_order("DN-152", date!(2026 - 03 - 10), 99.0),
    );

    let days = daily_delivered_tons(&mut orders, march_window()).unwrap();
    assert_eq!(days.len(), 1);
    let day = days.get(&date!(2026 - 03 - 10)).unwrap();
    assert!((day.straight_bar - 4.13).abs() < f64::EPSILON);
    assert!((day.cut_and_bend - 2.13).abs() < f64::EPSILON);
    assert!((day.total - 6.26).abs() < f64::EPSILON);
}

#[test]
fn test_dashboard_stats_counts_both_sets() {
    let mut orders = MemoryOrderStore::default();
    seed_order(
        &mut orders,
        create_test_new_order("DN-160", date!(2026 - 03 - 10), 1.0),
    );
    seed_order(
        &mut orders,
        create_test_new_order("DN-161", date!(2026 - 03 - 11), 1.0),
    );
    let mut history: NewOrder = create_test_new_order("DN-162", date!(2026 - 03 - 12), 1.0);
    history.status = OrderStatus::Delivered;
    seed_order(&mut orders, history);

    let stats = dashboard_stats(&mut orders).unwrap();
    assert_eq!(stats.active_orders, 2);
    assert_eq!(stats.delivered_orders, 1);
    assert_eq!(stats.total_orders, 3);
}
