//! Social media platform repository.

use sqlx::Postgres;
use sqlx::query_builder::Separated;

use zatrano_core::types::{DbId, SortPolicy};
use zatrano_entity::reference::{CreateSocialMedia, SocialMedia};

use super::base::BaseRepository;
use crate::table::{Insertable, Table};

/// Repository for social media platforms.
pub type SocialMediaRepository = BaseRepository<SocialMedia>;

impl Table for SocialMedia {
    const NAME: &'static str = "social_media";
    const ENTITY: &'static str = "social media";
    const SORT: SortPolicy = SortPolicy::new(&["id", "name", "is_active", "created_at"], "id");
    const FILTERABLE: &'static [&'static str] = &["id", "name", "is_active", "created_at"];
    const UPDATABLE: &'static [&'static str] = &["name", "icon", "is_active"];

    fn id(&self) -> DbId {
        self.id
    }
}

impl Insertable for SocialMedia {
    type New = CreateSocialMedia;

    const INSERT_COLUMNS: &'static [&'static str] = &["name", "icon", "is_active"];

    fn push_insert_values<'args>(
        new: &'args CreateSocialMedia,
        row: &mut Separated<'_, 'args, Postgres, &'static str>,
    ) {
        row.push_bind(new.name.as_str())
            .push_bind(new.icon.as_deref())
            .push_bind(new.is_active);
    }
}
