//! RSVP rows owned by an invitation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zatrano_core::types::{ActorId, DbId};

/// A guest entry on an invitation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvitationParticipant {
    /// Unique row identifier.
    pub id: DbId,
    /// Owning invitation.
    pub invitation_id: DbId,
    /// Guest name or label.
    pub title: String,
    /// Guest phone number.
    pub phone_number: String,
    /// Number of people attending under this entry.
    pub guest_count: i32,
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

/// A guest entry to attach to an invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvitationParticipant {
    /// Guest name or label.
    pub title: String,
    /// Guest phone number.
    pub phone_number: String,
    /// Attending head count.
    #[serde(default = "default_guest_count")]
    pub guest_count: i32,
}

impl CreateInvitationParticipant {
    /// Build a single-guest entry.
    pub fn new(title: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            phone_number: phone_number.into(),
            guest_count: default_guest_count(),
        }
    }
}

fn default_guest_count() -> i32 {
    1
}
