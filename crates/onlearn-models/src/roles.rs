//! Profile roles.
//!
//! Stored as the Postgres enum `user_role`. A new account starts as
//! `client`; prospective teachers sit in `pending_instructor` until an
//! admin approves (`instructor`) or rejects (`client`) them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    PendingInstructor,
    Instructor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Client,
        Role::PendingInstructor,
        Role::Instructor,
        Role::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::PendingInstructor => "pending_instructor",
            Role::Instructor => "instructor",
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
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("Invalid role: {}", s))
    }
}
