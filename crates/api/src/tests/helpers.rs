// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use steel_track_domain::Role;
use steel_track_persistence::Persistence;
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::{AuthenticatedActor, CreateOrderRequest};

pub fn setup_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to setup test persistence")
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-15 10:00:00 UTC)
}

pub fn test_today() -> Date {
    date!(2026 - 03 - 15)
}

pub fn viewer_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("viewer-1"), Some(Role::Viewer))
}

pub fn editor_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("editor-1"), Some(Role::Editor))
}

pub fn admin_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), Some(Role::Admin))
}

pub fn anonymous_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("anonymous"), None)
}

pub fn create_test_order_request(delivery_number: &str) -> CreateOrderRequest {
    CreateOrderRequest {
        delivery_number: delivery_number.to_string(),
        delivery_name: String::from("Al Noor Towers"),
        company: String::from("Emirates Steel"),
        site: String::from("Site A"),
        driver_name: None,
        phone_number: Some(String::from("+971501234567")),
        order_date: String::from("2026-03-10"),
        shift: String::from("morning"),
        order_type: String::from("straight-bar"),
        signed_delivery_note: false,
        tons: 12.5,
        breakdown: steel_track_domain::Breakdown::default(),
        status: None,
    }
}
