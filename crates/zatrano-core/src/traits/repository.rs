//! Generic repository trait for database access.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::field::FieldMap;
use crate::types::id::{ActorId, DbId};
use crate::types::pagination::{ListParams, PageResponse};

/// Generic CRUD repository over one entity type.
///
/// `Entity` is the row type returned by reads; `New` is the payload
/// accepted by inserts. Deletes are soft: rows are tombstoned, hidden
/// from every read here, and never physically removed.
#[async_trait]
pub trait Repository<Entity, New>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
    New: Send + Sync + 'static,
{
    /// List one page of non-deleted rows plus the total match count.
    async fn find_all(&self, params: &ListParams) -> AppResult<PageResponse<Entity>>;

    /// Find a non-deleted row by primary key, or `NotFound`.
    async fn find_by_id(&self, id: DbId) -> AppResult<Entity>;

    /// Insert one row and return it.
    async fn create(&self, new: &New) -> AppResult<Entity>;

    /// Insert many rows in a single statement.
    async fn bulk_create(&self, rows: &[New]) -> AppResult<Vec<Entity>>;

    /// Apply a partial update and stamp `updated_by`.
    ///
    /// Fails with `Precondition` when no live row has this id.
    async fn update(&self, id: DbId, changes: &FieldMap, updated_by: ActorId) -> AppResult<()>;

    /// Apply a partial update to every row matching `condition`.
    async fn bulk_update(
        &self,
        condition: &FieldMap,
        changes: &FieldMap,
        updated_by: ActorId,
    ) -> AppResult<u64>;

    /// Soft-delete a row. Fails with `Precondition` when no live row has this id.
    async fn delete(&self, id: DbId) -> AppResult<()>;

    /// Soft-delete every row matching `condition`.
    async fn bulk_delete(&self, condition: &FieldMap) -> AppResult<u64>;

    /// Count non-deleted rows.
    async fn count(&self) -> AppResult<u64>;
}
