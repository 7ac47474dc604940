//! User repository.

use sqlx::Postgres;
use sqlx::query_builder::Separated;

use zatrano_core::types::{DbId, SortPolicy};
use zatrano_entity::user::{CreateUser, User};

use super::base::BaseRepository;
use crate::table::{Insertable, Table};

/// Repository for dashboard and panel users.
pub type UserRepository = BaseRepository<User>;

impl Table for User {
    const NAME: &'static str = "users";
    const ENTITY: &'static str = "user";
    const SORT: SortPolicy =
        SortPolicy::new(&["id", "name", "email", "user_type", "is_active", "created_at"], "id");
    const FILTERABLE: &'static [&'static str] =
        &["id", "name", "email", "user_type", "is_active", "email_verified", "created_at"];
    const UPDATABLE: &'static [&'static str] =
        &["name", "email", "password_hash", "user_type", "is_active", "email_verified"];

    fn id(&self) -> DbId {
        self.id
    }
}

impl Insertable for User {
    type New = CreateUser;

    const INSERT_COLUMNS: &'static [&'static str] = &[
        "name",
        "email",
        "password_hash",
        "user_type",
        "is_active",
        "email_verified",
    ];

    fn push_insert_values<'args>(
        new: &'args CreateUser,
        row: &mut Separated<'_, 'args, Postgres, &'static str>,
    ) {
        row.push_bind(new.name.as_str())
            .push_bind(new.email.as_str())
            .push_bind(new.password_hash.as_deref())
            .push_bind(new.user_type)
            .push_bind(new.is_active)
            .push_bind(new.email_verified);
    }
}
