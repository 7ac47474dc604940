//! Social media platform entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zatrano_core::types::{ActorId, DbId};

/// A social platform a card can link to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SocialMedia {
    /// Unique platform identifier.
    pub id: DbId,
    /// Platform name.
    pub name: String,
    /// Icon class or asset name.
    pub icon: Option<String>,
    /// Whether the platform is offered in pickers.
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

/// Data required to create a new social platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSocialMedia {
    /// Platform name.
    pub name: String,
    /// Icon class or asset name.
    pub icon: Option<String>,
    /// Active flag.
    pub is_active: bool,
}

impl CreateSocialMedia {
    /// Build an active platform payload.
    pub fn new(name: impl Into<String>, icon: Option<&str>) -> Self {
        Self {
            name: name.into(),
            icon: icon.map(str::to_owned),
            is_active: true,
        }
    }
}
