//! Digital business card aggregate.
//!
//! A [`Card`] is the aggregate root; [`CardBank`] and [`CardSocialMedia`]
//! rows are owned by exactly one card and are always written through the
//! card repository.

pub mod bank_link;
pub mod model;
pub mod social_link;

pub use bank_link::{CardBank, CreateCardBank};
pub use model::{Card, CardAggregate, CreateCard};
pub use social_link::{CardSocialMedia, CreateCardSocialMedia};
