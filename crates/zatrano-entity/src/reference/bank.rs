//! Bank entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zatrano_core::types::{ActorId, DbId};

/// A bank that card owners can list an IBAN for.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bank {
    /// Unique bank identifier.
    pub id: DbId,
    /// Bank name.
    pub name: String,
    /// Whether the bank is offered in pickers.
    pub is_active: bool,
    /// When the bank was created.
    pub created_at: DateTime<Utc>,
    /// When the bank was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete tombstone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Actor of the last update.
    pub updated_by: Option<ActorId>,
}

/// Data required to create a new bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBank {
    /// Bank name.
    pub name: String,
    /// Active flag.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CreateBank {
    /// Build an active bank payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_active: true,
        }
    }
}

fn default_active() -> bool {
    true
}
