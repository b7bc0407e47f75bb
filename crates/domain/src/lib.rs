// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod access;
mod cycle;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use access::{AccessAction, Role, has_permission};
pub use cycle::{CYCLE_ANCHOR_DAY, CycleWindow};
pub use error::DomainError;
pub use types::{
    BarSize, Breakdown, DeliveredOrder, DeliveryNumber, Driver, DriverMetrics, NewDriver,
    NewOrder, Order, OrderRecord, OrderStatus, OrderType, Shift, UNIT_RATE_PER_TON, round2,
};
pub use validation::{
    BREAKDOWN_TOLERANCE_TONS, validate_breakdown_consistency, validate_driver_fields,
    validate_order_fields,
};
