// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-based access policy.
//!
//! Maps an actor's role to the actions it may perform. This is a pure
//! lookup with no state; it gates which lifecycle operations a caller
//! may invoke at the API boundary. Enforcement inside the data store
//! itself is the hosted store's concern, not reproduced here.

use serde::{Deserialize, Serialize};

/// Actor roles.
///
/// Roles describe dashboard operators, not drivers: a driver is domain
/// data, while a role belongs to whoever is operating the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Read-only access to orders, history, and metrics.
    #[serde(rename = "viewer")]
    Viewer,
    /// May create and edit orders and drivers, but not delete them.
    #[serde(rename = "editor")]
    Editor,
    /// Full access, including deletion.
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Converts this role to its wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Actions the access policy can gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessAction {
    /// Read orders, history, drivers, and metrics.
    View,
    /// Create orders or drivers.
    Create,
    /// Edit orders or drivers, including lifecycle transitions.
    Edit,
    /// Delete orders or drivers.
    Delete,
}

impl AccessAction {
    /// Returns the least-privileged role that may perform this action.
    #[must_use]
    pub const fn required_role(&self) -> Role {
        match self {
            Self::View => Role::Viewer,
            Self::Create | Self::Edit => Role::Editor,
            Self::Delete => Role::Admin,
        }
    }
}

/// Checks whether a role may perform an action.
///
/// An absent role (unauthenticated or unrecognized) is denied every
/// action, including `View`.
#[must_use]
pub const fn has_permission(role: Option<Role>, action: AccessAction) -> bool {
    let Some(role) = role else {
        return false;
    };
    match action {
        AccessAction::View => matches!(role, Role::Viewer | Role::Editor | Role::Admin),
        AccessAction::Create | AccessAction::Edit => matches!(role, Role::Editor | Role::Admin),
        AccessAction::Delete => matches!(role, Role::Admin),
    }
}
