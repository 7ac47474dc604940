//! Reference data: lookup tables that cards and invitations point at.

pub mod bank;
pub mod invitation_category;
pub mod social_media;

pub use bank::{Bank, CreateBank};
pub use invitation_category::{CreateInvitationCategory, InvitationCategory};
pub use social_media::{CreateSocialMedia, SocialMedia};
