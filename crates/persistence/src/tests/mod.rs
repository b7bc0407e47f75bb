// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use steel_track_domain::{
    Breakdown, DeliveryNumber, NewDriver, NewOrder, OrderStatus, OrderType, Shift,
};
use time::macros::datetime;
use time::{Date, OffsetDateTime};

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-15 10:00:00 UTC)
}

pub fn create_test_new_order(delivery_number: &str, order_date: Date, tons: f64) -> NewOrder {
    NewOrder {
        delivery_number: DeliveryNumber::new(delivery_number).expect("Valid delivery number"),
        delivery_name: String::from("Al Noor Towers"),
        company: String::from("Emirates Steel"),
        site: String::from("Site A"),
        driver_name: None,
        phone_number: Some(String::from("+971501234567")),
        order_date,
        shift: Shift::Morning,
        order_type: OrderType::StraightBar,
        signed_delivery_note: false,
        tons,
        breakdown: Breakdown::default(),
        status: OrderStatus::InProgress,
    }
}

pub fn create_test_new_driver(name: &str) -> NewDriver {
    NewDriver {
        name: name.to_string(),
        phone_number: String::from("+971501234567"),
        is_active: true,
    }
}
