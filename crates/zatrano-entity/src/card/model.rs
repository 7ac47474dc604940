//! Card entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zatrano_core::types::{ActorId, DbId};

use super::bank_link::{CardBank, CreateCardBank};
use super::social_link::{CardSocialMedia, CreateCardSocialMedia};

/// A user's public business card, reachable by its slug.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Card {
    /// Unique card identifier.
    pub id: DbId,
    /// Owning user. A user has at most one card.
    pub user_id: DbId,
    /// Public URL slug, unique across live and deleted cards.
    pub slug: String,
    /// Whether the card is publicly visible.
    pub is_active: bool,
    /// Whether the card is on the free plan.
    pub is_free: bool,
    /// Holder name.
    pub name: Option<String>,
    /// Job title.
    pub title: Option<String>,
    /// Photo path.
    pub photo: Option<String>,
    /// Contact phone number.
    pub telephone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
    /// Personal or company website.
    pub website_url: Option<String>,
    /// Online store link.
    pub store_url: Option<String>,
    /// When the card was created.
    pub created_at: DateTime<Utc>,
    /// When the card was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete tombstone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Actor of the last update.
    pub updated_by: Option<ActorId>,
    /// Bank accounts listed on the card.
    #[sqlx(skip)]
    #[serde(default)]
    pub banks: Vec<CardBank>,
    /// Social profile links listed on the card.
    #[sqlx(skip)]
    #[serde(default)]
    pub social_media: Vec<CardSocialMedia>,
}

impl Card {
    /// Check if the card has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Root columns of a new or replaced card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCard {
    /// Owning user.
    pub user_id: DbId,
    /// Public URL slug.
    pub slug: String,
    /// Visibility flag.
    pub is_active: bool,
    /// Free plan flag.
    pub is_free: bool,
    /// Holder name.
    pub name: Option<String>,
    /// Job title.
    pub title: Option<String>,
    /// Photo path.
    pub photo: Option<String>,
    /// Contact phone number.
    pub telephone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
    /// Website link.
    pub website_url: Option<String>,
    /// Store link.
    pub store_url: Option<String>,
}

impl CreateCard {
    /// Build an active card payload with only the required columns set.
    pub fn new(user_id: DbId, slug: impl Into<String>) -> Self {
        Self {
            user_id,
            slug: slug.into(),
            is_active: true,
            ..Self::default()
        }
    }
}

/// A card root together with the full set of children it should own.
///
/// Child payloads carry no `card_id`; the repository stamps the root's id
/// onto every child before inserting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardAggregate {
    /// Root columns.
    pub card: CreateCard,
    /// Desired bank accounts.
    #[serde(default)]
    pub banks: Vec<CreateCardBank>,
    /// Desired social links.
    #[serde(default)]
    pub social_media: Vec<CreateCardSocialMedia>,
}

impl CardAggregate {
    /// Start an aggregate with no children.
    pub fn new(card: CreateCard) -> Self {
        Self {
            card,
            ..Self::default()
        }
    }

    /// Add a bank account.
    pub fn with_bank(mut self, bank_id: DbId, iban: impl Into<String>) -> Self {
        self.banks.push(CreateCardBank {
            bank_id,
            iban: iban.into(),
        });
        self
    }

    /// Add a social link.
    pub fn with_social_media(mut self, social_media_id: DbId, url: impl Into<String>) -> Self {
        self.social_media.push(CreateCardSocialMedia {
            social_media_id,
            url: url.into(),
        });
        self
    }
}
