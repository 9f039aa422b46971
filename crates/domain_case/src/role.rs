//! Roles and the transition authorization rule

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use core_kernel::UserId;
use crate::error::CaseError;
use crate::status::CaseStatus;

/// Portal role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Case owner; read-only view of their own case
    Client,
    /// Staff; may list, inspect and transition every case
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "admin" => Ok(Role::Admin),
            other => Err(CaseError::ValidationFailed(format!("unknown role: {}", other))),
        }
    }
}

/// The user performing an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn admin(user_id: UserId) -> Self {
        Self::new(user_id, Role::Admin)
    }

    pub fn client(user_id: UserId) -> Self {
        Self::new(user_id, Role::Client)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Whether `role` may move a case from `from` to `to`
///
/// Admins may set any status in any order, including backward moves and
/// moves away from `completed`. Clients never may.
pub fn can_transition(role: Role, _from: CaseStatus, _to: CaseStatus) -> bool {
    match role {
        Role::Admin => true,
        Role::Client => false,
    }
}

/// [`can_transition`] as a `Result`
pub fn ensure_can_transition(role: Role, from: CaseStatus, to: CaseStatus) -> Result<(), CaseError> {
    if can_transition(role, from, to) {
        Ok(())
    } else {
        Err(CaseError::ForbiddenTransition { role, from, to })
    }
}
