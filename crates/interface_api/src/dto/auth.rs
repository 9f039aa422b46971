//! Authentication DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClientId, UserId};
use domain_case::{Role, UserAccount};

/// Token type reported with every login
pub const BEARER: &str = "bearer";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub role: Role,
    pub user_id: UserId,
}

/// The logged-in user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserAccount> for UserResponse {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            email: account.email,
            role: account.role,
            client_id: account.client_id,
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}
