//! Invitation aggregate repository.

use sqlx::postgres::PgConnection;
use sqlx::query_builder::Separated;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use zatrano_core::config::{KeyConfig, PaginationConfig};
use zatrano_core::error::AppError;
use zatrano_core::result::AppResult;
use zatrano_core::types::{ActorId, DbId, FieldMap, ListParams, PageResponse, SortPolicy};
use zatrano_entity::invitation::{
    CreateInvitation, CreateInvitationDetail, CreateInvitationParticipant, Invitation,
    InvitationAggregate, InvitationDetail, InvitationParticipant,
};

use super::base::BaseRepository;
use crate::aggregate::{self, ChildRow};
use crate::error::map_sqlx_error;
use crate::guards::{self, KeyGenerator};
use crate::query;
use crate::table::Table;

/// Root columns written on create and overwritten on update.
/// `invitation_key` is assigned once on insert and never rewritten.
const INVITATION_COLUMNS: &[&str] = &[
    "image",
    "user_id",
    "category_id",
    "is_confirmed",
    "is_participant",
    "is_free",
    "description",
    "venue",
    "address",
    "location",
    "link",
    "telephone",
    "note",
    "date",
    "time",
];

impl Table for Invitation {
    const NAME: &'static str = "invitations";
    const ENTITY: &'static str = "invitation";
    const SORT: SortPolicy = SortPolicy::new(
        &["id", "date", "is_confirmed", "invitation_key", "created_at"],
        "id",
    );
    const FILTERABLE: &'static [&'static str] = &[
        "id",
        "invitation_key",
        "user_id",
        "category_id",
        "is_confirmed",
        "is_participant",
        "is_free",
        "date",
        "created_at",
    ];
    const UPDATABLE: &'static [&'static str] = &[
        "image",
        "category_id",
        "is_confirmed",
        "is_participant",
        "is_free",
        "description",
        "venue",
        "address",
        "location",
        "link",
        "telephone",
        "note",
        "date",
        "time",
    ];

    fn id(&self) -> DbId {
        self.id
    }
}

fn push_invitation_values<'args>(
    new: &'args CreateInvitation,
    row: &mut Separated<'_, 'args, Postgres, &'static str>,
) {
    row.push_bind(new.image.as_str())
        .push_bind(new.user_id)
        .push_bind(new.category_id)
        .push_bind(new.is_confirmed)
        .push_bind(new.is_participant)
        .push_bind(new.is_free)
        .push_bind(new.description.as_deref())
        .push_bind(new.venue.as_deref())
        .push_bind(new.address.as_deref())
        .push_bind(new.location.as_deref())
        .push_bind(new.link.as_deref())
        .push_bind(new.telephone.as_deref())
        .push_bind(new.note.as_deref())
        .push_bind(new.date)
        .push_bind(new.time.as_deref());
}

impl ChildRow for InvitationDetail {
    const TABLE: &'static str = "invitation_details";
    const PARENT_COLUMN: &'static str = "invitation_id";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "person",
        "is_mother_live",
        "mother_name",
        "mother_surname",
        "is_father_live",
        "father_name",
        "father_surname",
        "bride_name",
        "bride_surname",
        "is_bride_mother_live",
        "bride_mother_name",
        "bride_mother_surname",
        "is_bride_father_live",
        "bride_father_name",
        "bride_father_surname",
        "groom_name",
        "groom_surname",
        "is_groom_mother_live",
        "groom_mother_name",
        "groom_mother_surname",
        "is_groom_father_live",
        "groom_father_name",
        "groom_father_surname",
    ];
    const SELECT: &'static str = "SELECT c.* FROM invitation_details c";

    type New = CreateInvitationDetail;

    fn parent_id(&self) -> DbId {
        self.invitation_id
    }

    fn push_values<'args>(
        new: &'args CreateInvitationDetail,
        row: &mut Separated<'_, 'args, Postgres, &'static str>,
    ) {
        row.push_bind(new.title.as_deref())
            .push_bind(new.person.as_deref())
            .push_bind(new.is_mother_live)
            .push_bind(new.mother_name.as_deref())
            .push_bind(new.mother_surname.as_deref())
            .push_bind(new.is_father_live)
            .push_bind(new.father_name.as_deref())
            .push_bind(new.father_surname.as_deref())
            .push_bind(new.bride_name.as_deref())
            .push_bind(new.bride_surname.as_deref())
            .push_bind(new.is_bride_mother_live)
            .push_bind(new.bride_mother_name.as_deref())
            .push_bind(new.bride_mother_surname.as_deref())
            .push_bind(new.is_bride_father_live)
            .push_bind(new.bride_father_name.as_deref())
            .push_bind(new.bride_father_surname.as_deref())
            .push_bind(new.groom_name.as_deref())
            .push_bind(new.groom_surname.as_deref())
            .push_bind(new.is_groom_mother_live)
            .push_bind(new.groom_mother_name.as_deref())
            .push_bind(new.groom_mother_surname.as_deref())
            .push_bind(new.is_groom_father_live)
            .push_bind(new.groom_father_name.as_deref())
            .push_bind(new.groom_father_surname.as_deref());
    }
}

impl ChildRow for InvitationParticipant {
    const TABLE: &'static str = "invitation_participants";
    const PARENT_COLUMN: &'static str = "invitation_id";
    const COLUMNS: &'static [&'static str] = &["title", "phone_number", "guest_count"];
    const SELECT: &'static str = "SELECT c.* FROM invitation_participants c";

    type New = CreateInvitationParticipant;

    fn parent_id(&self) -> DbId {
        self.invitation_id
    }

    fn push_values<'args>(
        new: &'args CreateInvitationParticipant,
        row: &mut Separated<'_, 'args, Postgres, &'static str>,
    ) {
        row.push_bind(new.title.as_str())
            .push_bind(new.phone_number.as_str())
            .push_bind(new.guest_count);
    }
}

/// Repository for invitations, their detail row and their participants.
///
/// Listings load the detail row only; single reads also load participants.
#[derive(Debug, Clone)]
pub struct InvitationRepository {
    base: BaseRepository<Invitation>,
    keys: KeyGenerator,
}

impl InvitationRepository {
    /// Create a new invitation repository with the default key settings.
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
            keys: KeyGenerator::default(),
        }
    }

    /// Override the page size bounds.
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.base = self.base.with_pagination(pagination);
        self
    }

    /// Override the key length and retry bound.
    pub fn with_keys(mut self, keys: &KeyConfig) -> Self {
        self.keys = KeyGenerator::from_config(keys);
        self
    }

    fn pool(&self) -> &PgPool {
        self.base.pool()
    }

    /// List one page of invitations with their detail rows.
    pub async fn find_all(&self, params: &ListParams) -> AppResult<PageResponse<Invitation>> {
        let mut page = self.base.find_all(params).await?;
        self.attach_children(&mut page.data, false).await?;
        Ok(page)
    }

    /// Find a live invitation by id.
    pub async fn find_by_id(&self, id: DbId) -> AppResult<Invitation> {
        let invitation = self.base.find_by_id(id).await?;
        self.with_children(invitation).await
    }

    /// Find the live invitation published under `key`.
    pub async fn find_by_key(&self, key: &str) -> AppResult<Invitation> {
        let invitation = sqlx::query_as::<_, Invitation>(
            "SELECT * FROM invitations WHERE invitation_key = $1 AND deleted_at IS NULL",
        )
        .bind(key)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| map_sqlx_error("find invitation by key", e))?
        .ok_or_else(|| AppError::not_found(format!("No invitation with key '{key}'")))?;
        self.with_children(invitation).await
    }

    /// Whether any invitation, including deleted ones, holds `key`.
    pub async fn key_exists(&self, key: &str) -> AppResult<bool> {
        guards::invitation_key_exists(self.pool(), key).await
    }

    /// Insert an invitation under a freshly generated key, together with
    /// its detail row and participants, in one transaction.
    #[instrument(skip(self, aggregate), fields(user_id = aggregate.invitation.user_id))]
    pub async fn create_with_relations(
        &self,
        aggregate: &InvitationAggregate,
    ) -> AppResult<Invitation> {
        let mut tx = aggregate::begin(self.pool(), "create invitation").await?;
        let outcome = self.write_new(&mut tx, aggregate).await;
        aggregate::finish(tx, "create invitation", outcome).await
    }

    /// Overwrite an invitation's columns and replace its detail row and
    /// participants. The key is kept.
    #[instrument(skip(self, aggregate))]
    pub async fn update_with_relations(
        &self,
        id: DbId,
        aggregate: &InvitationAggregate,
        updated_by: ActorId,
    ) -> AppResult<Invitation> {
        let mut tx = aggregate::begin(self.pool(), "update invitation").await?;
        let outcome = Self::write_replacement(&mut tx, id, aggregate, updated_by).await;
        aggregate::finish(tx, "update invitation", outcome).await
    }

    /// Soft-delete an invitation together with its detail and participants.
    #[instrument(skip(self))]
    pub async fn delete_with_relations(&self, id: DbId) -> AppResult<()> {
        let mut tx = aggregate::begin(self.pool(), "delete invitation").await?;
        let outcome = Self::write_removal(&mut tx, id).await;
        aggregate::finish(tx, "delete invitation", outcome).await
    }

    /// Partial update of the invitation's own columns.
    pub async fn update(&self, id: DbId, changes: &FieldMap, updated_by: ActorId) -> AppResult<()> {
        self.base.update(id, changes, updated_by).await
    }

    /// Number of live invitations.
    pub async fn count(&self) -> AppResult<u64> {
        self.base.count().await
    }

    async fn write_new(
        &self,
        conn: &mut PgConnection,
        aggregate: &InvitationAggregate,
    ) -> AppResult<Invitation> {
        let key = self.keys.next_unique(&mut *conn).await?;
        debug!(key = %key, "Assigned invitation key");

        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "INSERT INTO invitations (invitation_key, {}) ",
            INVITATION_COLUMNS.join(", ")
        ));
        qb.push_values(std::iter::once(&aggregate.invitation), |mut row, invitation| {
            row.push_bind(key.as_str());
            push_invitation_values(invitation, &mut row);
        });
        qb.push(" RETURNING *");

        let mut invitation = qb
            .build_query_as::<Invitation>()
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("insert invitation", e))?;

        Self::insert_owned(conn, &mut invitation, aggregate).await?;
        Ok(invitation)
    }

    async fn write_replacement(
        conn: &mut PgConnection,
        id: DbId,
        aggregate: &InvitationAggregate,
        updated_by: ActorId,
    ) -> AppResult<Invitation> {
        aggregate::lock_root(conn, Invitation::NAME, Invitation::ENTITY, id).await?;

        let mut qb = query::overwrite_prefix(Invitation::NAME, INVITATION_COLUMNS);
        {
            let mut row = qb.separated(", ");
            push_invitation_values(&aggregate.invitation, &mut row);
        }
        query::overwrite_suffix(&mut qb, id, updated_by);
        qb.push(" RETURNING *");

        let mut invitation = qb
            .build_query_as::<Invitation>()
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(&format!("update invitation {id}"), e))?;

        aggregate::purge_children::<InvitationDetail>(conn, id).await?;
        aggregate::purge_children::<InvitationParticipant>(conn, id).await?;

        Self::insert_owned(conn, &mut invitation, aggregate).await?;
        Ok(invitation)
    }

    async fn write_removal(conn: &mut PgConnection, id: DbId) -> AppResult<()> {
        aggregate::lock_root(conn, Invitation::NAME, Invitation::ENTITY, id).await?;
        aggregate::tombstone_children::<InvitationDetail>(conn, id).await?;
        aggregate::tombstone_children::<InvitationParticipant>(conn, id).await?;
        aggregate::tombstone_root(conn, Invitation::NAME, Invitation::ENTITY, id).await
    }

    async fn insert_owned(
        conn: &mut PgConnection,
        invitation: &mut Invitation,
        aggregate: &InvitationAggregate,
    ) -> AppResult<()> {
        let detail =
            aggregate::insert_children::<InvitationDetail>(conn, invitation.id, aggregate.detail.as_slice())
                .await?;
        invitation.detail = detail.into_iter().next();
        invitation.participants = aggregate::insert_children::<InvitationParticipant>(
            conn,
            invitation.id,
            &aggregate.participants,
        )
        .await?;
        Ok(())
    }

    async fn with_children(&self, mut invitation: Invitation) -> AppResult<Invitation> {
        self.attach_children(std::slice::from_mut(&mut invitation), true)
            .await?;
        Ok(invitation)
    }

    async fn attach_children(
        &self,
        invitations: &mut [Invitation],
        with_participants: bool,
    ) -> AppResult<()> {
        let ids: Vec<DbId> = invitations.iter().map(|invitation| invitation.id).collect();
        let mut details = aggregate::load_children::<InvitationDetail>(self.pool(), &ids).await?;
        let mut participants = if with_participants {
            aggregate::load_children::<InvitationParticipant>(self.pool(), &ids).await?
        } else {
            Default::default()
        };

        for invitation in invitations.iter_mut() {
            invitation.detail = details
                .remove(&invitation.id)
                .and_then(|rows| rows.into_iter().next());
            invitation.participants = participants.remove(&invitation.id).unwrap_or_default();
        }
        Ok(())
    }
}
