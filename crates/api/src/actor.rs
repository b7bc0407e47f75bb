// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor identity and role parsing at the API boundary.
//!
//! The boundary receives an already asserted identity; establishing who
//! the caller is belongs to the hosted identity provider. This module
//! only carries the identity forward and maps it onto the access
//! policy.

use steel_track_domain::{AccessAction, Role, has_permission};

use crate::error::AuthError;

/// A role string that is not one of the recognized wire values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role '{0}': expected viewer, editor, or admin")]
pub struct RoleParseError(pub String);

/// Parses a wire role string.
///
/// # Errors
///
/// Returns `RoleParseError` for anything other than `viewer`, `editor`,
/// or `admin`.
pub fn parse_role(value: &str) -> Result<Role, RoleParseError> {
    match value {
        "viewer" => Ok(Role::Viewer),
        "editor" => Ok(Role::Editor),
        "admin" => Ok(Role::Admin),
        other => Err(RoleParseError(other.to_string())),
    }
}

/// An actor whose identity has been asserted upstream.
///
/// `role` is `None` when the caller presented no role or an
/// unrecognized one; such an actor is denied every action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor, if any.
    pub role: Option<Role>,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Option<Role>) -> Self {
        Self { id, role }
    }

    /// Checks whether this actor may perform an action.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` naming the action and the
    /// least-privileged role that would be allowed.
    pub fn authorize(&self, action: AccessAction, action_name: &str) -> Result<(), AuthError> {
        if has_permission(self.role, action) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: action_name.to_string(),
            required_role: action.required_role().as_str().to_string(),
        })
    }
}
