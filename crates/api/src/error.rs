// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use steel_track_core::{CoreError, StoreError};
use steel_track_domain::DomainError;

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The backing store failed.
    StorageFailure {
        /// A description of the storage failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::StorageFailure { message } => {
                write!(f, "Storage failure: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::DuplicateDeliveryNumber { delivery_number } => ApiError::DomainRuleViolation {
            rule: String::from("unique_delivery_number"),
            message: format!("Delivery number '{delivery_number}' already exists"),
        },
        DomainError::EmptyDeliveryNumber => ApiError::InvalidInput {
            field: String::from("delivery_number"),
            message: String::from("Delivery number must not be empty"),
        },
        DomainError::MissingField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Field '{field}' is required"),
        },
        DomainError::InvalidTons { tons } => ApiError::InvalidInput {
            field: String::from("tons"),
            message: format!("Total tons must be positive, got {tons}"),
        },
        DomainError::BreakdownMismatch {
            tons,
            breakdown_total,
        } => ApiError::DomainRuleViolation {
            rule: String::from("breakdown_consistency"),
            message: format!(
                "Breakdown totals {breakdown_total} tons but the order declares {tons}"
            ),
        },
        DomainError::NegativeBreakdownEntry { size, value } => ApiError::InvalidInput {
            field: String::from("breakdown"),
            message: format!("Breakdown entry for {size} must not be negative, got {value}"),
        },
        DomainError::OrderNotFound { delivery_number } => ApiError::ResourceNotFound {
            resource_type: String::from("Order"),
            message: format!("No order with delivery number '{delivery_number}'"),
        },
        DomainError::DriverNotFound { driver_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Driver"),
            message: format!("No driver with id '{driver_id}'"),
        },
        DomainError::InvalidDriverName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown order status '{value}'"),
        },
        DomainError::InvalidShift(value) => ApiError::InvalidInput {
            field: String::from("shift"),
            message: format!("Unknown shift '{value}'"),
        },
        DomainError::InvalidOrderType(value) => ApiError::InvalidInput {
            field: String::from("order_type"),
            message: format!("Unknown order type '{value}'"),
        },
        DomainError::InvalidBarSize(value) => ApiError::InvalidInput {
            field: String::from("breakdown"),
            message: format!("Unknown bar size '{value}'"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Storage(StoreError::NotFound(what)) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: format!("No stored record for '{what}'"),
        },
        CoreError::Storage(StoreError::Backend(msg)) => ApiError::StorageFailure { message: msg },
    }
}
