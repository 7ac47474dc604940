//! Social profile rows owned by a card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zatrano_core::types::{ActorId, DbId};

/// A social profile link listed on a card.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CardSocialMedia {
    /// Unique row identifier.
    pub id: DbId,
    /// Owning card.
    pub card_id: DbId,
    /// Referenced platform.
    pub social_media_id: DbId,
    /// Profile URL.
    pub url: String,
    /// Platform name, populated when loaded with the platform joined.
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media_name: Option<String>,
    /// Platform icon, populated when loaded with the platform joined.
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media_icon: Option<String>,
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

/// A social link to attach to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCardSocialMedia {
    /// Referenced platform.
    pub social_media_id: DbId,
    /// Profile URL.
    pub url: String,
}
