//! Bank repository.

use sqlx::Postgres;
use sqlx::query_builder::Separated;

use zatrano_core::types::{DbId, SortPolicy};
use zatrano_entity::reference::{Bank, CreateBank};

use super::base::BaseRepository;
use crate::table::{Insertable, Table};

/// Repository for banks.
pub type BankRepository = BaseRepository<Bank>;

impl Table for Bank {
    const NAME: &'static str = "banks";
    const ENTITY: &'static str = "bank";
    const SORT: SortPolicy = SortPolicy::new(&["id", "name", "is_active", "created_at"], "id");
    const FILTERABLE: &'static [&'static str] = &["id", "name", "is_active", "created_at"];
    const UPDATABLE: &'static [&'static str] = &["name", "is_active"];

    fn id(&self) -> DbId {
        self.id
    }
}

impl Insertable for Bank {
    type New = CreateBank;

    const INSERT_COLUMNS: &'static [&'static str] = &["name", "is_active"];

    fn push_insert_values<'args>(
        new: &'args CreateBank,
        row: &mut Separated<'_, 'args, Postgres, &'static str>,
    ) {
        row.push_bind(new.name.as_str()).push_bind(new.is_active);
    }
}
