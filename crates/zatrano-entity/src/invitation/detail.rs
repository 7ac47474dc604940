//! The one-to-one detail row of an invitation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zatrano_core::types::{ActorId, DbId};

/// People named on an invitation and their families.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvitationDetail {
    /// Unique row identifier.
    pub id: DbId,
    /// Owning invitation. Unique.
    pub invitation_id: DbId,
    /// Headline.
    pub title: Option<String>,
    /// Person the event is for.
    pub person: Option<String>,
    pub is_mother_live: bool,
    pub mother_name: Option<String>,
    pub mother_surname: Option<String>,
    pub is_father_live: bool,
    pub father_name: Option<String>,
    pub father_surname: Option<String>,
    pub bride_name: Option<String>,
    pub bride_surname: Option<String>,
    pub is_bride_mother_live: bool,
    pub bride_mother_name: Option<String>,
    pub bride_mother_surname: Option<String>,
    pub is_bride_father_live: bool,
    pub bride_father_name: Option<String>,
    pub bride_father_surname: Option<String>,
    pub groom_name: Option<String>,
    pub groom_surname: Option<String>,
    pub is_groom_mother_live: bool,
    pub groom_mother_name: Option<String>,
    pub groom_mother_surname: Option<String>,
    pub is_groom_father_live: bool,
    pub groom_father_name: Option<String>,
    pub groom_father_surname: Option<String>,
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

/// Detail columns for a new or replaced invitation.
///
/// The `is_*_live` flags default to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateInvitationDetail {
    pub title: Option<String>,
    pub person: Option<String>,
    pub is_mother_live: bool,
    pub mother_name: Option<String>,
    pub mother_surname: Option<String>,
    pub is_father_live: bool,
    pub father_name: Option<String>,
    pub father_surname: Option<String>,
    pub bride_name: Option<String>,
    pub bride_surname: Option<String>,
    pub is_bride_mother_live: bool,
    pub bride_mother_name: Option<String>,
    pub bride_mother_surname: Option<String>,
    pub is_bride_father_live: bool,
    pub bride_father_name: Option<String>,
    pub bride_father_surname: Option<String>,
    pub groom_name: Option<String>,
    pub groom_surname: Option<String>,
    pub is_groom_mother_live: bool,
    pub groom_mother_name: Option<String>,
    pub groom_mother_surname: Option<String>,
    pub is_groom_father_live: bool,
    pub groom_father_name: Option<String>,
    pub groom_father_surname: Option<String>,
}

impl Default for CreateInvitationDetail {
    fn default() -> Self {
        Self {
            title: None,
            person: None,
            is_mother_live: true,
            mother_name: None,
            mother_surname: None,
            is_father_live: true,
            father_name: None,
            father_surname: None,
            bride_name: None,
            bride_surname: None,
            is_bride_mother_live: true,
            bride_mother_name: None,
            bride_mother_surname: None,
            is_bride_father_live: true,
            bride_father_name: None,
            bride_father_surname: None,
            groom_name: None,
            groom_surname: None,
            is_groom_mother_live: true,
            groom_mother_name: None,
            groom_mother_surname: None,
            is_groom_father_live: true,
            groom_father_name: None,
            groom_father_surname: None,
        }
    }
}
