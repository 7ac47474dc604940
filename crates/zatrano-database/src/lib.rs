//! # zatrano-database
//!
//! PostgreSQL connection management and the persistence layer for all
//! Zatrano entities:
//!
//! - [`BaseRepository`] gives every table paginated listing with an
//!   allow-listed sort column, soft-delete CRUD, bulk variants and count.
//! - [`CardRepository`] and [`InvitationRepository`] write an aggregate
//!   root together with its owned child rows inside one transaction,
//!   replacing the full child set on every update.
//! - [`guards`] holds the slug availability check and the bounded
//!   invitation key generator.

pub mod aggregate;
pub mod connection;
pub mod error;
pub mod guards;
pub mod migration;
pub mod query;
pub mod repositories;
pub mod table;

pub use connection::DatabasePool;
pub use guards::{KeyGenerator, KeyLookup};
pub use repositories::{
    BankRepository, BaseRepository, CardRepository, InvitationCategoryRepository,
    InvitationRepository, SocialMediaRepository, UserRepository,
};
pub use table::{Insertable, Table};
