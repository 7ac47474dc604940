//! Building blocks for writing an aggregate root and its owned children in
//! one transaction.
//!
//! Child collections are replaced wholesale: an update purges every child
//! row of the root and inserts the caller's full set again. Deleting an
//! aggregate tombstones the root and its children together.

use std::collections::HashMap;

use sqlx::postgres::{PgConnection, PgRow};
use sqlx::query_builder::Separated;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use tracing::{debug, info, warn};

use zatrano_core::error::AppError;
use zatrano_core::result::AppResult;
use zatrano_core::types::DbId;

use crate::error::map_sqlx_error;

/// A row wholly owned by an aggregate root.
pub trait ChildRow: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    /// Child table name.
    const TABLE: &'static str;
    /// Column holding the parent id.
    const PARENT_COLUMN: &'static str;
    /// Payload columns, in the order [`push_values`](Self::push_values)
    /// binds them. Excludes the parent column.
    const COLUMNS: &'static [&'static str];
    /// `SELECT` over the child table aliased `c`, optionally joined to the
    /// rows it references for display columns.
    const SELECT: &'static str;

    /// Insert payload without a parent id.
    type New: Send + Sync;

    /// Parent this row belongs to.
    fn parent_id(&self) -> DbId;

    /// Bind one payload's values, one per entry of `COLUMNS`.
    fn push_values<'args>(
        new: &'args Self::New,
        row: &mut Separated<'_, 'args, Postgres, &'static str>,
    );
}

/// Open an aggregate transaction.
pub async fn begin(pool: &PgPool, op: &'static str) -> AppResult<Transaction<'static, Postgres>> {
    pool.begin()
        .await
        .map_err(|e| map_sqlx_error(op, e).into_transaction_failure())
}

/// Commit `tx` when `outcome` succeeded, otherwise roll it back.
///
/// Failures are returned with generic query errors re-tagged as
/// transaction failures.
pub async fn finish<T>(
    tx: Transaction<'static, Postgres>,
    op: &'static str,
    outcome: AppResult<T>,
) -> AppResult<T> {
    match outcome {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| map_sqlx_error(op, e).into_transaction_failure())?;
            info!(op, "Aggregate transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(op, error = %rollback_err, "Rollback failed");
            }
            warn!(op, error = %err, "Aggregate transaction rolled back");
            Err(err.into_transaction_failure())
        }
    }
}

/// Stamp `parent_id` onto every payload and insert them in one statement.
///
/// An empty collection issues no statement.
pub async fn insert_children<C: ChildRow>(
    conn: &mut PgConnection,
    parent_id: DbId,
    items: &[C::New],
) -> AppResult<Vec<C>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
        "INSERT INTO {} ({}, {}) ",
        C::TABLE,
        C::PARENT_COLUMN,
        C::COLUMNS.join(", ")
    ));
    qb.push_values(items, |mut row, item| {
        row.push_bind(parent_id);
        C::push_values(item, &mut row);
    });
    qb.push(" RETURNING *");

    let rows = qb
        .build_query_as::<C>()
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(C::TABLE, e))?;

    debug!(table = C::TABLE, parent_id, count = rows.len(), "Inserted child rows");
    Ok(rows)
}

/// Physically remove every child row of `parent_id`.
pub async fn purge_children<C: ChildRow>(conn: &mut PgConnection, parent_id: DbId) -> AppResult<u64> {
    let sql = format!("DELETE FROM {} WHERE {} = $1", C::TABLE, C::PARENT_COLUMN);
    let removed = sqlx::query(&sql)
        .bind(parent_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(C::TABLE, e))?
        .rows_affected();

    debug!(table = C::TABLE, parent_id, removed, "Purged child rows");
    Ok(removed)
}

/// Soft-delete every live child row of `parent_id`.
pub async fn tombstone_children<C: ChildRow>(
    conn: &mut PgConnection,
    parent_id: DbId,
) -> AppResult<u64> {
    let sql = format!(
        "UPDATE {} SET deleted_at = NOW(), updated_at = NOW() \
         WHERE {} = $1 AND deleted_at IS NULL",
        C::TABLE,
        C::PARENT_COLUMN
    );
    let removed = sqlx::query(&sql)
        .bind(parent_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(C::TABLE, e))?
        .rows_affected();

    debug!(table = C::TABLE, parent_id, removed, "Tombstoned child rows");
    Ok(removed)
}

/// Load the live children of several parents at once, grouped by parent.
pub async fn load_children<C: ChildRow>(
    pool: &PgPool,
    parent_ids: &[DbId],
) -> AppResult<HashMap<DbId, Vec<C>>> {
    if parent_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let sql = format!(
        "{} WHERE c.{} = ANY($1) AND c.deleted_at IS NULL ORDER BY c.id",
        C::SELECT,
        C::PARENT_COLUMN
    );
    let rows = sqlx::query_as::<_, C>(&sql)
        .bind(parent_ids)
        .fetch_all(pool)
        .await
        .map_err(|e| map_sqlx_error(C::TABLE, e))?;

    let mut grouped: HashMap<DbId, Vec<C>> = HashMap::with_capacity(parent_ids.len());
    for row in rows {
        grouped.entry(row.parent_id()).or_default().push(row);
    }
    Ok(grouped)
}

/// Lock a live root row for the rest of the transaction.
///
/// Fails with `Precondition` when the row does not exist, so an update or
/// delete of a missing aggregate never reaches its child tables.
pub async fn lock_root(
    conn: &mut PgConnection,
    table: &'static str,
    entity: &'static str,
    id: DbId,
) -> AppResult<()> {
    let sql = format!("SELECT id FROM {table} WHERE id = $1 AND deleted_at IS NULL FOR UPDATE");
    let found: Option<DbId> = sqlx::query_scalar(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(table, e))?;

    match found {
        Some(_) => Ok(()),
        None => Err(AppError::precondition(format!("{entity} {id} does not exist"))),
    }
}

/// Soft-delete a live root row; `Precondition` when there is none.
pub async fn tombstone_root(
    conn: &mut PgConnection,
    table: &'static str,
    entity: &'static str,
    id: DbId,
) -> AppResult<()> {
    let sql = format!(
        "UPDATE {table} SET deleted_at = NOW(), updated_at = NOW() \
         WHERE id = $1 AND deleted_at IS NULL"
    );
    let affected = sqlx::query(&sql)
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(table, e))?
        .rows_affected();

    if affected == 0 {
        return Err(AppError::precondition(format!("{entity} {id} does not exist")));
    }
    Ok(())
}
