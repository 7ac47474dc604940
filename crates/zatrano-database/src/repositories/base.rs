//! Generic soft-delete repository over any [`Table`].

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use zatrano_core::config::PaginationConfig;
use zatrano_core::error::AppError;
use zatrano_core::result::AppResult;
use zatrano_core::traits::Repository;
use zatrano_core::types::{ActorId, DbId, FieldMap, ListParams, PageRequest, PageResponse};

use crate::error::map_sqlx_error;
use crate::query;
use crate::table::{Insertable, Table};

/// PostgreSQL bind parameters allowed in one statement.
const MAX_BIND_PARAMS: usize = 65_535;

/// CRUD, listing and bulk operations for one table.
///
/// Reads only ever see live rows; deletes set `deleted_at`.
pub struct BaseRepository<T> {
    pool: PgPool,
    pagination: PaginationConfig,
    _table: PhantomData<fn() -> T>,
}

impl<T> Clone for BaseRepository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            pagination: self.pagination,
            _table: PhantomData,
        }
    }
}

impl<T: Table> fmt::Debug for BaseRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseRepository")
            .field("table", &T::NAME)
            .field("pagination", &self.pagination)
            .finish()
    }
}

impl<T: Table> BaseRepository<T> {
    /// Create a repository with the default page size bounds.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            pagination: PaginationConfig::default(),
            _table: PhantomData,
        }
    }

    /// Override the page size bounds.
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// The pool this repository runs on.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Normalize the page parameters of `params`.
    pub fn page_request(&self, params: &ListParams) -> PageRequest {
        params.page_request(&self.pagination)
    }

    /// One page of live rows plus the number of rows matching the filters.
    ///
    /// The page and the count are two separate statements and may disagree
    /// under concurrent writes.
    pub async fn find_all(&self, params: &ListParams) -> AppResult<PageResponse<T>> {
        let page = self.page_request(params);

        let total: i64 = query::count_query::<T>(&params.filters)?
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("count {}", T::NAME), e))?;

        if total == 0 {
            return Ok(PageResponse::empty(&page));
        }

        let rows = query::list_query::<T>(params, &page)?
            .build_query_as::<T>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("list {}", T::NAME), e))?;

        Ok(PageResponse::new(rows, &page, total as u64))
    }

    /// Find a live row by primary key, or `NotFound`.
    pub async fn find_by_id(&self, id: DbId) -> AppResult<T> {
        let sql = format!(
            "SELECT * FROM {} WHERE id = $1 AND deleted_at IS NULL",
            T::NAME
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("find {} {id}", T::ENTITY), e))?
            .ok_or_else(|| AppError::not_found(format!("{} {id} not found", T::ENTITY)))
    }

    /// Apply a partial update to one live row and stamp the actor.
    pub async fn update(&self, id: DbId, changes: &FieldMap, updated_by: ActorId) -> AppResult<()> {
        let affected = query::update_query::<T>(id, changes, updated_by)?
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("update {} {id}", T::ENTITY), e))?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::precondition(format!(
                "{} {id} does not exist",
                T::ENTITY
            )));
        }
        debug!(table = T::NAME, id, updated_by, "Row updated");
        Ok(())
    }

    /// Apply a partial update to every live row matching `condition`.
    pub async fn bulk_update(
        &self,
        condition: &FieldMap,
        changes: &FieldMap,
        updated_by: ActorId,
    ) -> AppResult<u64> {
        let affected = query::bulk_update_query::<T>(condition, changes, updated_by)?
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("bulk update {}", T::NAME), e))?
            .rows_affected();

        debug!(table = T::NAME, affected, updated_by, "Rows updated");
        Ok(affected)
    }

    /// Soft-delete one live row.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let affected = self.delete_many(&[id]).await?;
        if affected == 0 {
            return Err(AppError::precondition(format!(
                "{} {id} does not exist",
                T::ENTITY
            )));
        }
        Ok(())
    }

    /// Soft-delete every live row whose id is listed.
    pub async fn delete_many(&self, ids: &[DbId]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "UPDATE {} SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = ANY($1) AND deleted_at IS NULL",
            T::NAME
        );
        let affected = sqlx::query(&sql)
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("delete {}", T::NAME), e))?
            .rows_affected();

        debug!(table = T::NAME, affected, "Rows soft-deleted");
        Ok(affected)
    }

    /// Soft-delete every live row matching `condition`.
    pub async fn bulk_delete(&self, condition: &FieldMap) -> AppResult<u64> {
        let affected = query::bulk_delete_query::<T>(condition)?
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("bulk delete {}", T::NAME), e))?
            .rows_affected();

        debug!(table = T::NAME, affected, "Rows soft-deleted");
        Ok(affected)
    }

    /// Number of live rows.
    pub async fn count(&self) -> AppResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE deleted_at IS NULL", T::NAME);
        let total: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("count {}", T::NAME), e))?;
        Ok(total as u64)
    }
}

impl<T: Insertable> BaseRepository<T> {
    /// Insert one row and return it as stored.
    pub async fn create(&self, new: &T::New) -> AppResult<T> {
        let row = query::insert_query::<T>(std::slice::from_ref(new))
            .build_query_as::<T>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("create {}", T::ENTITY), e))?;

        debug!(table = T::NAME, id = row.id(), "Row created");
        Ok(row)
    }

    /// Insert many rows atomically.
    ///
    /// Rows are sent in as few statements as the bind parameter limit
    /// allows, all inside one transaction.
    pub async fn bulk_create(&self, rows: &[T::New]) -> AppResult<Vec<T>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_size = (MAX_BIND_PARAMS / T::INSERT_COLUMNS.len().max(1)).max(1);
        let op = format!("bulk create {}", T::NAME);
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(&op, e))?;

        let mut created = Vec::with_capacity(rows.len());
        for chunk in rows.chunks(chunk_size) {
            let inserted = query::insert_query::<T>(chunk)
                .build_query_as::<T>()
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error(&op, e))?;
            created.extend(inserted);
        }

        tx.commit().await.map_err(|e| map_sqlx_error(&op, e))?;
        debug!(table = T::NAME, count = created.len(), "Rows created");
        Ok(created)
    }
}

#[async_trait]
impl<T: Insertable> Repository<T, T::New> for BaseRepository<T> {
    async fn find_all(&self, params: &ListParams) -> AppResult<PageResponse<T>> {
        BaseRepository::find_all(self, params).await
    }

    async fn find_by_id(&self, id: DbId) -> AppResult<T> {
        BaseRepository::find_by_id(self, id).await
    }

    async fn create(&self, new: &T::New) -> AppResult<T> {
        BaseRepository::create(self, new).await
    }

    async fn bulk_create(&self, rows: &[T::New]) -> AppResult<Vec<T>> {
        BaseRepository::bulk_create(self, rows).await
    }

    async fn update(&self, id: DbId, changes: &FieldMap, updated_by: ActorId) -> AppResult<()> {
        BaseRepository::update(self, id, changes, updated_by).await
    }

    async fn bulk_update(
        &self,
        condition: &FieldMap,
        changes: &FieldMap,
        updated_by: ActorId,
    ) -> AppResult<u64> {
        BaseRepository::bulk_update(self, condition, changes, updated_by).await
    }

    async fn delete(&self, id: DbId) -> AppResult<()> {
        BaseRepository::delete(self, id).await
    }

    async fn bulk_delete(&self, condition: &FieldMap) -> AppResult<u64> {
        BaseRepository::bulk_delete(self, condition).await
    }

    async fn count(&self) -> AppResult<u64> {
        BaseRepository::count(self).await
    }
}
