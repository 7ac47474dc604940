//! Invitation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zatrano_core::types::{ActorId, DbId};

use super::detail::{CreateInvitationDetail, InvitationDetail};
use super::participant::{CreateInvitationParticipant, InvitationParticipant};

/// An event invitation, publicly addressed by its generated key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invitation {
    /// Unique invitation identifier.
    pub id: DbId,
    /// Generated public key. Immutable once assigned.
    pub invitation_key: String,
    /// Cover image path.
    pub image: String,
    /// Owning user.
    pub user_id: DbId,
    /// Invitation category.
    pub category_id: DbId,
    /// Whether the owner has confirmed the invitation.
    pub is_confirmed: bool,
    /// Whether the invitation collects participant RSVPs.
    pub is_participant: bool,
    /// Whether the invitation is on the free plan.
    pub is_free: bool,
    /// Free-form description.
    pub description: Option<String>,
    /// Venue name.
    pub venue: Option<String>,
    /// Venue address.
    pub address: Option<String>,
    /// Map location.
    pub location: Option<String>,
    /// External link.
    pub link: Option<String>,
    /// Contact phone number.
    pub telephone: Option<String>,
    /// Extra note.
    pub note: Option<String>,
    /// Event date.
    pub date: Option<DateTime<Utc>>,
    /// Event time of day, e.g. `19:30`.
    pub time: Option<String>,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
    /// When the invitation was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete tombstone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Actor of the last update.
    pub updated_by: Option<ActorId>,
    /// People and family details.
    #[sqlx(skip)]
    #[serde(default)]
    pub detail: Option<InvitationDetail>,
    /// RSVP rows.
    #[sqlx(skip)]
    #[serde(default)]
    pub participants: Vec<InvitationParticipant>,
}

impl Invitation {
    /// Total number of guests across the loaded participants.
    pub fn guest_total(&self) -> i64 {
        self.participants
            .iter()
            .map(|p| i64::from(p.guest_count))
            .sum()
    }
}

/// Root columns of a new or replaced invitation.
///
/// The public key is not part of the payload; it is generated on create
/// and never changed afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateInvitation {
    /// Cover image path.
    pub image: String,
    /// Owning user.
    pub user_id: DbId,
    /// Invitation category.
    pub category_id: DbId,
    /// Confirmation flag.
    pub is_confirmed: bool,
    /// RSVP flag.
    pub is_participant: bool,
    /// Free plan flag.
    pub is_free: bool,
    /// Description.
    pub description: Option<String>,
    /// Venue name.
    pub venue: Option<String>,
    /// Venue address.
    pub address: Option<String>,
    /// Map location.
    pub location: Option<String>,
    /// External link.
    pub link: Option<String>,
    /// Contact phone number.
    pub telephone: Option<String>,
    /// Extra note.
    pub note: Option<String>,
    /// Event date.
    pub date: Option<DateTime<Utc>>,
    /// Event time of day.
    pub time: Option<String>,
}

impl CreateInvitation {
    /// Build a payload with only the required columns set.
    pub fn new(user_id: DbId, category_id: DbId, image: impl Into<String>) -> Self {
        Self {
            user_id,
            category_id,
            image: image.into(),
            ..Self::default()
        }
    }
}

/// An invitation root with its desired detail and participants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvitationAggregate {
    /// Root columns.
    pub invitation: CreateInvitation,
    /// Detail row, if any.
    #[serde(default)]
    pub detail: Option<CreateInvitationDetail>,
    /// Participant rows.
    #[serde(default)]
    pub participants: Vec<CreateInvitationParticipant>,
}

impl InvitationAggregate {
    /// Start an aggregate with no children.
    pub fn new(invitation: CreateInvitation) -> Self {
        Self {
            invitation,
            ..Self::default()
        }
    }

    /// Set the detail row.
    pub fn with_detail(mut self, detail: CreateInvitationDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Add a participant.
    pub fn with_participant(mut self, participant: CreateInvitationParticipant) -> Self {
        self.participants.push(participant);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: DbId, guests: i32) -> InvitationParticipant {
        let now = Utc::now();
        InvitationParticipant {
            id,
            invitation_id: 1,
            title: format!("Guest {id}"),
            phone_number: "5550000000".into(),
            guest_count: guests,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            updated_by: None,
        }
    }

    #[test]
    fn test_guest_total_sums_participants() {
        let now = Utc::now();
        let invitation = Invitation {
            id: 1,
            invitation_key: "abcDEF12345".into(),
            image: "cover.jpg".into(),
            user_id: 1,
            category_id: 1,
            is_confirmed: false,
            is_participant: true,
            is_free: true,
            description: None,
            venue: None,
            address: None,
            location: None,
            link: None,
            telephone: None,
            note: None,
            date: None,
            time: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            updated_by: None,
            detail: None,
            participants: vec![participant(1, 2), participant(2, 3)],
        };
        assert_eq!(invitation.guest_total(), 5);
    }

    #[test]
    fn test_aggregate_payload_has_no_key() {
        let aggregate = InvitationAggregate::new(CreateInvitation::new(1, 2, "x.jpg"))
            .with_participant(CreateInvitationParticipant::new("Ali", "555"));
        let json = serde_json::to_value(&aggregate).unwrap();
        assert!(json["invitation"].get("invitation_key").is_none());
        assert_eq!(json["participants"][0]["guest_count"], 1);
    }
}
