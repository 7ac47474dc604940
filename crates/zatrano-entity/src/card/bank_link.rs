//! Bank account rows owned by a card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zatrano_core::types::{ActorId, DbId};

/// An IBAN listed on a card.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CardBank {
    /// Unique row identifier.
    pub id: DbId,
    /// Owning card.
    pub card_id: DbId,
    /// Referenced bank.
    pub bank_id: DbId,
    /// Account IBAN.
    pub iban: String,
    /// Bank name, populated when loaded with the bank joined.
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
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

/// A bank account to attach to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCardBank {
    /// Referenced bank.
    pub bank_id: DbId,
    /// Account IBAN.
    pub iban: String,
}
