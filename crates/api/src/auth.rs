// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization boundary.
//!
//! Authentication and session issuance live outside this system; the core
//! consumes authorization as an opaque "is this caller allowed" check. The
//! stub here validates the shape of the claim (non-empty actor, known
//! role) and gates write operations on the admin role.

use crate::error::ApiError;

/// Actor roles for authorization.
///
/// Roles apply to system operators, never to the employee records they
/// administer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: may create, update, inactivate, restore, delete, and
    /// sweep records.
    Admin,
    /// Viewer role: read-only access to lists, history, and aggregates.
    Viewer,
}

impl Role {
    /// Parses a role from its string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known role.
    pub fn parse(s: &str) -> Result<Self, ApiError> {
        match s {
            "admin" | "Admin" => Ok(Self::Admin),
            "viewer" | "Viewer" => Ok(Self::Viewer),
            other => Err(ApiError::AuthenticationFailed {
                reason: format!("Unknown role '{other}'"),
            }),
        }
    }

    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Viewer => "viewer",
        }
    }
}

/// An authenticated actor with an associated role.
///
/// This represents an operator the external authentication collaborator
/// has already vouched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Requires the admin role for a write operation.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` naming the attempted action.
    pub fn require_admin(&self, action: &str) -> Result<(), ApiError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("admin"),
            })
        }
    }
}

/// Stub authentication function.
///
/// This is a minimal placeholder for the external authentication
/// collaborator. It does NOT implement real authentication; it only
/// validates the claim's shape.
///
/// # Arguments
///
/// * `actor_id` - The identifier of the actor to authenticate
/// * `role` - The role claimed for the actor
///
/// # Returns
///
/// An authenticated actor if the claim is well-formed.
///
/// # Errors
///
/// Returns an error if the actor ID is empty.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, ApiError> {
    if actor_id.trim().is_empty() {
        return Err(ApiError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}
