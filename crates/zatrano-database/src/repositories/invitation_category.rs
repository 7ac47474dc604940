//! Invitation category repository.

use sqlx::Postgres;
use sqlx::query_builder::Separated;

use zatrano_core::types::{DbId, SortPolicy};
use zatrano_entity::reference::{CreateInvitationCategory, InvitationCategory};

use super::base::BaseRepository;
use crate::table::{Insertable, Table};

/// Repository for invitation categories.
pub type InvitationCategoryRepository = BaseRepository<InvitationCategory>;

impl Table for InvitationCategory {
    const NAME: &'static str = "invitation_categories";
    const ENTITY: &'static str = "invitation category";
    const SORT: SortPolicy = SortPolicy::new(&["id", "name", "is_active", "created_at"], "id");
    const FILTERABLE: &'static [&'static str] = &["id", "name", "is_active", "created_at"];
    const UPDATABLE: &'static [&'static str] = &["name", "icon", "template", "is_active"];

    fn id(&self) -> DbId {
        self.id
    }
}

impl Insertable for InvitationCategory {
    type New = CreateInvitationCategory;

    const INSERT_COLUMNS: &'static [&'static str] = &["name", "icon", "template", "is_active"];

    fn push_insert_values<'args>(
        new: &'args CreateInvitationCategory,
        row: &mut Separated<'_, 'args, Postgres, &'static str>,
    ) {
        row.push_bind(new.name.as_str())
            .push_bind(new.icon.as_deref())
            .push_bind(new.template.as_deref())
            .push_bind(new.is_active);
    }
}
