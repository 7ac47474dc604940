//! Card aggregate repository.

use sqlx::postgres::PgConnection;
use sqlx::query_builder::Separated;
use sqlx::{PgPool, Postgres};
use tracing::instrument;

use zatrano_core::config::PaginationConfig;
use zatrano_core::error::AppError;
use zatrano_core::result::AppResult;
use zatrano_core::types::{ActorId, DbId, FieldMap, ListParams, PageResponse, SortPolicy};
use zatrano_entity::card::{
    Card, CardAggregate, CardBank, CardSocialMedia, CreateCard, CreateCardBank,
    CreateCardSocialMedia,
};

use super::base::BaseRepository;
use crate::aggregate::{self, ChildRow};
use crate::error::map_sqlx_error;
use crate::guards;
use crate::query;
use crate::table::{Insertable, Table};

impl Table for Card {
    const NAME: &'static str = "cards";
    const ENTITY: &'static str = "card";
    const SORT: SortPolicy =
        SortPolicy::new(&["id", "name", "slug", "is_active", "created_at"], "id");
    const FILTERABLE: &'static [&'static str] = &[
        "id",
        "user_id",
        "slug",
        "name",
        "is_active",
        "is_free",
        "created_at",
    ];
    // slug and user_id only change through the aggregate update, which
    // re-checks slug availability.
    const UPDATABLE: &'static [&'static str] = &[
        "name",
        "title",
        "photo",
        "telephone",
        "email",
        "location",
        "website_url",
        "store_url",
        "is_active",
        "is_free",
    ];

    fn id(&self) -> DbId {
        self.id
    }
}

impl Insertable for Card {
    type New = CreateCard;

    const INSERT_COLUMNS: &'static [&'static str] = &[
        "user_id",
        "slug",
        "is_active",
        "is_free",
        "name",
        "title",
        "photo",
        "telephone",
        "email",
        "location",
        "website_url",
        "store_url",
    ];

    fn push_insert_values<'args>(
        new: &'args CreateCard,
        row: &mut Separated<'_, 'args, Postgres, &'static str>,
    ) {
        row.push_bind(new.user_id)
            .push_bind(new.slug.as_str())
            .push_bind(new.is_active)
            .push_bind(new.is_free)
            .push_bind(new.name.as_deref())
            .push_bind(new.title.as_deref())
            .push_bind(new.photo.as_deref())
            .push_bind(new.telephone.as_deref())
            .push_bind(new.email.as_deref())
            .push_bind(new.location.as_deref())
            .push_bind(new.website_url.as_deref())
            .push_bind(new.store_url.as_deref());
    }
}

impl ChildRow for CardBank {
    const TABLE: &'static str = "card_banks";
    const PARENT_COLUMN: &'static str = "card_id";
    const COLUMNS: &'static [&'static str] = &["bank_id", "iban"];
    const SELECT: &'static str =
        "SELECT c.*, b.name AS bank_name FROM card_banks c LEFT JOIN banks b ON b.id = c.bank_id";

    type New = CreateCardBank;

    fn parent_id(&self) -> DbId {
        self.card_id
    }

    fn push_values<'args>(
        new: &'args CreateCardBank,
        row: &mut Separated<'_, 'args, Postgres, &'static str>,
    ) {
        row.push_bind(new.bank_id).push_bind(new.iban.as_str());
    }
}

impl ChildRow for CardSocialMedia {
    const TABLE: &'static str = "card_social_media";
    const PARENT_COLUMN: &'static str = "card_id";
    const COLUMNS: &'static [&'static str] = &["social_media_id", "url"];
    const SELECT: &'static str = "SELECT c.*, s.name AS social_media_name, \
         s.icon AS social_media_icon FROM card_social_media c \
         LEFT JOIN social_media s ON s.id = c.social_media_id";

    type New = CreateCardSocialMedia;

    fn parent_id(&self) -> DbId {
        self.card_id
    }

    fn push_values<'args>(
        new: &'args CreateCardSocialMedia,
        row: &mut Separated<'_, 'args, Postgres, &'static str>,
    ) {
        row.push_bind(new.social_media_id)
            .push_bind(new.url.as_str());
    }
}

/// Repository for cards and their bank and social media links.
///
/// Every read returns cards with both link collections loaded, including
/// the referenced bank and platform names.
#[derive(Debug, Clone)]
pub struct CardRepository {
    base: BaseRepository<Card>,
}

impl CardRepository {
    /// Create a new card repository.
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Override the page size bounds.
    pub fn with_pagination(self, pagination: PaginationConfig) -> Self {
        Self {
            base: self.base.with_pagination(pagination),
        }
    }

    fn pool(&self) -> &PgPool {
        self.base.pool()
    }

    /// List one page of cards with their links.
    pub async fn find_all(&self, params: &ListParams) -> AppResult<PageResponse<Card>> {
        let mut page = self.base.find_all(params).await?;
        self.attach_children(&mut page.data).await?;
        Ok(page)
    }

    /// Find a live card by id.
    pub async fn find_by_id(&self, id: DbId) -> AppResult<Card> {
        let card = self.base.find_by_id(id).await?;
        self.with_children(card).await
    }

    /// Find the live card published under `slug`.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Card> {
        let card = sqlx::query_as::<_, Card>(
            "SELECT * FROM cards WHERE slug = $1 AND deleted_at IS NULL",
        )
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| map_sqlx_error("find card by slug", e))?
        .ok_or_else(|| AppError::not_found(format!("No card with slug '{slug}'")))?;
        self.with_children(card).await
    }

    /// Find the live card owned by `user_id`.
    pub async fn find_by_user(&self, user_id: DbId) -> AppResult<Card> {
        let card = sqlx::query_as::<_, Card>(
            "SELECT * FROM cards WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| map_sqlx_error("find card by user", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} has no card")))?;
        self.with_children(card).await
    }

    /// Whether `slug` may be used, ignoring the card `exclude`.
    pub async fn is_slug_available(&self, slug: &str, exclude: Option<DbId>) -> AppResult<bool> {
        guards::slug_available(self.pool(), slug, exclude).await
    }

    /// Insert a card and all of its links in one transaction.
    ///
    /// The returned links do not carry the joined bank and platform names.
    #[instrument(skip(self, aggregate), fields(slug = %aggregate.card.slug))]
    pub async fn create_with_relations(&self, aggregate: &CardAggregate) -> AppResult<Card> {
        let mut tx = aggregate::begin(self.pool(), "create card").await?;
        let outcome = Self::write_new(&mut tx, aggregate).await;
        aggregate::finish(tx, "create card", outcome).await
    }

    /// Overwrite a card's columns and replace all of its links.
    #[instrument(skip(self, aggregate), fields(slug = %aggregate.card.slug))]
    pub async fn update_with_relations(
        &self,
        id: DbId,
        aggregate: &CardAggregate,
        updated_by: ActorId,
    ) -> AppResult<Card> {
        let mut tx = aggregate::begin(self.pool(), "update card").await?;
        let outcome = Self::write_replacement(&mut tx, id, aggregate, updated_by).await;
        aggregate::finish(tx, "update card", outcome).await
    }

    /// Soft-delete a card together with its links.
    #[instrument(skip(self))]
    pub async fn delete_with_relations(&self, id: DbId) -> AppResult<()> {
        let mut tx = aggregate::begin(self.pool(), "delete card").await?;
        let outcome = Self::write_removal(&mut tx, id).await;
        aggregate::finish(tx, "delete card", outcome).await
    }

    /// Partial update of the card's own columns. Links are untouched.
    pub async fn update(&self, id: DbId, changes: &FieldMap, updated_by: ActorId) -> AppResult<()> {
        self.base.update(id, changes, updated_by).await
    }

    /// Number of live cards.
    pub async fn count(&self) -> AppResult<u64> {
        self.base.count().await
    }

    async fn write_new(conn: &mut PgConnection, aggregate: &CardAggregate) -> AppResult<Card> {
        ensure_slug_free(conn, &aggregate.card.slug, None).await?;

        let mut card = query::insert_query::<Card>(std::slice::from_ref(&aggregate.card))
            .build_query_as::<Card>()
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("insert card", e))?;

        card.banks = aggregate::insert_children::<CardBank>(conn, card.id, &aggregate.banks).await?;
        card.social_media =
            aggregate::insert_children::<CardSocialMedia>(conn, card.id, &aggregate.social_media).await?;
        Ok(card)
    }

    async fn write_replacement(
        conn: &mut PgConnection,
        id: DbId,
        aggregate: &CardAggregate,
        updated_by: ActorId,
    ) -> AppResult<Card> {
        aggregate::lock_root(conn, Card::NAME, Card::ENTITY, id).await?;
        ensure_slug_free(conn, &aggregate.card.slug, Some(id)).await?;

        let mut qb = query::overwrite_query::<Card>(id, &aggregate.card, updated_by);
        qb.push(" RETURNING *");
        let mut card = qb
            .build_query_as::<Card>()
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(&format!("update card {id}"), e))?;

        aggregate::purge_children::<CardBank>(conn, id).await?;
        aggregate::purge_children::<CardSocialMedia>(conn, id).await?;

        card.banks = aggregate::insert_children::<CardBank>(conn, id, &aggregate.banks).await?;
        card.social_media =
            aggregate::insert_children::<CardSocialMedia>(conn, id, &aggregate.social_media).await?;
        Ok(card)
    }

    async fn write_removal(conn: &mut PgConnection, id: DbId) -> AppResult<()> {
        aggregate::lock_root(conn, Card::NAME, Card::ENTITY, id).await?;
        aggregate::tombstone_children::<CardBank>(conn, id).await?;
        aggregate::tombstone_children::<CardSocialMedia>(conn, id).await?;
        aggregate::tombstone_root(conn, Card::NAME, Card::ENTITY, id).await
    }

    async fn with_children(&self, mut card: Card) -> AppResult<Card> {
        self.attach_children(std::slice::from_mut(&mut card)).await?;
        Ok(card)
    }

    async fn attach_children(&self, cards: &mut [Card]) -> AppResult<()> {
        let ids: Vec<DbId> = cards.iter().map(|card| card.id).collect();
        let mut banks = aggregate::load_children::<CardBank>(self.pool(), &ids).await?;
        let mut social = aggregate::load_children::<CardSocialMedia>(self.pool(), &ids).await?;

        for card in cards.iter_mut() {
            card.banks = banks.remove(&card.id).unwrap_or_default();
            card.social_media = social.remove(&card.id).unwrap_or_default();
        }
        Ok(())
    }
}

/// `ConstraintViolation` when another card, live or deleted, holds `slug`.
async fn ensure_slug_free(
    conn: &mut PgConnection,
    slug: &str,
    exclude: Option<DbId>,
) -> AppResult<()> {
    if guards::slug_available(&mut *conn, slug, exclude).await? {
        Ok(())
    } else {
        Err(AppError::constraint_violation(format!(
            "Slug '{slug}' is already in use"
        )))
    }
}
