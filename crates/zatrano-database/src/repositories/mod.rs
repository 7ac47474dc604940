//! Repository implementations for all Zatrano entities.

pub mod bank;
pub mod base;
pub mod card;
pub mod invitation;
pub mod invitation_category;
pub mod social_media;
pub mod user;

pub use bank::BankRepository;
pub use base::BaseRepository;
pub use card::CardRepository;
pub use invitation::InvitationRepository;
pub use invitation_category::InvitationCategoryRepository;
pub use social_media::SocialMediaRepository;
pub use user::UserRepository;
