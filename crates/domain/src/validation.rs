// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{BarSize, Breakdown, NewDriver, NewOrder};

/// Allowed absolute difference between an order's total tons and the sum
/// of its per-size breakdown.
pub const BREAKDOWN_TOLERANCE_TONS: f64 = 0.1;

/// Validates the caller-supplied fields of a new order.
///
/// Checks that the required text fields are present and that tons are
/// strictly positive. Delivery-number emptiness is enforced by
/// `DeliveryNumber::new` and is not re-checked here.
///
/// # Errors
///
/// Returns `DomainError::MissingField` for an empty required field, or
/// `DomainError::InvalidTons` for a non-positive tonnage.
pub fn validate_order_fields(order: &NewOrder) -> Result<(), DomainError> {
    if order.delivery_name.is_empty() {
        return Err(DomainError::MissingField {
            field: "delivery_name",
        });
    }
    if order.company.is_empty() {
        return Err(DomainError::MissingField { field: "company" });
    }
    if order.site.is_empty() {
        return Err(DomainError::MissingField { field: "site" });
    }
    if order.tons <= 0.0 {
        return Err(DomainError::InvalidTons { tons: order.tons });
    }
    Ok(())
}

/// Validates that a non-zero breakdown is consistent with the declared
/// total tons, within [`BREAKDOWN_TOLERANCE_TONS`].
///
/// An all-zero breakdown is always accepted: the breakdown is optional
/// detail, not a required decomposition. This check runs at creation
/// only; updates are not re-validated.
///
/// # Errors
///
/// Returns `DomainError::NegativeBreakdownEntry` for a negative entry,
/// or `DomainError::BreakdownMismatch` when the non-zero breakdown total
/// falls outside the tolerance.
pub fn validate_breakdown_consistency(tons: f64, breakdown: &Breakdown) -> Result<(), DomainError> {
    for size in BarSize::ALL {
        let value: f64 = breakdown.get(size);
        if value < 0.0 {
            return Err(DomainError::NegativeBreakdownEntry {
                size: size.as_str(),
                value,
            });
        }
    }

    if breakdown.is_zero() {
        return Ok(());
    }

    let breakdown_total: f64 = breakdown.total();
    if (breakdown_total - tons).abs() > BREAKDOWN_TOLERANCE_TONS {
        return Err(DomainError::BreakdownMismatch {
            tons,
            breakdown_total,
        });
    }
    Ok(())
}

/// Validates the fields of a new roster driver.
///
/// # Errors
///
/// Returns `DomainError::InvalidDriverName` if the name is empty.
pub fn validate_driver_fields(driver: &NewDriver) -> Result<(), DomainError> {
    if driver.name.is_empty() {
        return Err(DomainError::InvalidDriverName(String::from(
            "Driver name cannot be empty",
        )));
    }
    Ok(())
}
