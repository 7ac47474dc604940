//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zatrano_core::types::{ActorId, DbId};

use super::kind::UserType;

/// A dashboard or panel account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: DbId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Password hash, managed by the auth layer.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Account surface.
    pub user_type: UserType,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete tombstone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Actor of the last update.
    pub updated_by: Option<ActorId>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: Option<String>,
    /// Account surface.
    pub user_type: UserType,
    /// Active flag.
    pub is_active: bool,
    /// Verified flag.
    pub email_verified: bool,
}
