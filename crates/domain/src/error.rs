// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A delivery number already exists in the active or history set.
    DuplicateDeliveryNumber {
        /// The offending delivery number.
        delivery_number: String,
    },
    /// The delivery number is empty.
    EmptyDeliveryNumber,
    /// A required order field is missing or empty.
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// Total tons must be strictly positive.
    InvalidTons {
        /// The invalid tons value.
        tons: f64,
    },
    /// The per-size breakdown does not add up to the total tons.
    BreakdownMismatch {
        /// The declared total tons.
        tons: f64,
        /// The sum of the breakdown entries.
        breakdown_total: f64,
    },
    /// A breakdown entry is negative.
    NegativeBreakdownEntry {
        /// The bar size with the negative entry.
        size: &'static str,
        /// The negative value.
        value: f64,
    },
    /// No order with the given delivery number exists in the expected set.
    OrderNotFound {
        /// The delivery number that was looked up.
        delivery_number: String,
    },
    /// No driver with the given id exists.
    DriverNotFound {
        /// The driver id that was looked up.
        driver_id: String,
    },
    /// Driver name is empty or invalid.
    InvalidDriverName(String),
    /// The order status string is not a lifecycle-significant value.
    InvalidStatus(String),
    /// The shift string is not recognized.
    InvalidShift(String),
    /// The order type string is not recognized.
    InvalidOrderType(String),
    /// The bar size string is not one of the nine nominal diameters.
    InvalidBarSize(String),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDeliveryNumber { delivery_number } => {
                write!(f, "Delivery number '{delivery_number}' already exists")
            }
            Self::EmptyDeliveryNumber => write!(f, "Delivery number cannot be empty"),
            Self::MissingField { field } => write!(f, "Required field '{field}' is missing"),
            Self::InvalidTons { tons } => {
                write!(f, "Total tons must be positive, got {tons}")
            }
            Self::BreakdownMismatch {
                tons,
                breakdown_total,
            } => {
                write!(
                    f,
                    "Breakdown total {breakdown_total} does not match order tons {tons}"
                )
            }
            Self::NegativeBreakdownEntry { size, value } => {
                write!(f, "Breakdown entry for {size} cannot be negative: {value}")
            }
            Self::OrderNotFound { delivery_number } => {
                write!(f, "Order '{delivery_number}' not found")
            }
            Self::DriverNotFound { driver_id } => {
                write!(f, "Driver '{driver_id}' not found")
            }
            Self::InvalidDriverName(msg) => write!(f, "Invalid driver name: {msg}"),
            Self::InvalidStatus(s) => write!(f, "Invalid order status: '{s}'"),
            Self::InvalidShift(s) => write!(f, "Invalid shift: '{s}'"),
            Self::InvalidOrderType(s) => write!(f, "Invalid order type: '{s}'"),
            Self::InvalidBarSize(s) => write!(f, "Invalid bar size: '{s}'"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
