//! Invitation aggregate.
//!
//! An [`Invitation`] owns at most one [`InvitationDetail`] and any number
//! of [`InvitationParticipant`] rows.

pub mod detail;
pub mod model;
pub mod participant;

pub use detail::{CreateInvitationDetail, InvitationDetail};
pub use model::{CreateInvitation, Invitation, InvitationAggregate};
pub use participant::{CreateInvitationParticipant, InvitationParticipant};
