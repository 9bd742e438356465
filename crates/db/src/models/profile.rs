//! Profile model and role enum.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{Timestamp, UserId};

/// Access role. Maps to the `user_role` Postgres enum; a profile's role may
/// also be NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// A row from the `profiles` table. `id` equals the auth user id.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: UserId,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub role: Option<Role>,
    pub created_at: Timestamp,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}
