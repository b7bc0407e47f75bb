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

mod error;
mod lifecycle;
mod metrics;
mod roster;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::CoreError;
pub use lifecycle::{
    UpdateOrder, create_order, delete_order, mark_delivered, reactivate, update_in_place,
};
pub use metrics::{
    DailyTons, DashboardStats, daily_delivered_tons, dashboard_stats, metrics_for_all_drivers,
    metrics_for_driver,
};
pub use roster::{UpdateDriver, create_driver, delete_driver, update_driver};
pub use store::{DriverStore, OrderStore, StoreError};
