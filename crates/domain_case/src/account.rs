//! Portal user accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClientId, UserId};
use crate::role::{Actor, Role};

/// A login known to the account directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    /// Case owned by this account; always set for clients
    #[serde(default)]
    pub client_id: Option<ClientId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Creates an active account
    pub fn new(email: impl Into<String>, role: Role, client_id: Option<ClientId>) -> Self {
        Self {
            id: UserId::new_v7(),
            email: email.into(),
            role,
            client_id,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// The account acting on a request
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }
}

/// One-time credentials handed back when a client account is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCredentials {
    pub user_id: UserId,
    pub email: String,
    pub password: String,
}
