//! Invitation category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zatrano_core::types::{ActorId, DbId};

/// A kind of invitation (wedding, engagement, circumcision, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvitationCategory {
    /// Unique category identifier.
    pub id: DbId,
    /// Category name.
    pub name: String,
    /// Icon class or asset name.
    pub icon: Option<String>,
    /// Template key used to render invitations of this kind.
    pub template: Option<String>,
    /// Whether new invitations may use this category.
    pub is_active: bool,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete tombstone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Actor of the last update.
    pub updated_by: Option<ActorId>,
}

/// Data required to create a new invitation category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvitationCategory {
    /// Category name.
    pub name: String,
    /// Icon class or asset name.
    pub icon: Option<String>,
    /// Template key.
    pub template: Option<String>,
    /// Active flag.
    pub is_active: bool,
}

impl CreateInvitationCategory {
    /// Build an active category payload with no icon or template.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
            template: None,
            is_active: true,
        }
    }
}
