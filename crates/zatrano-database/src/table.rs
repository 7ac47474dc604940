//! Static table descriptions that drive the generic repository.

use sqlx::postgres::{PgRow, Postgres};
use sqlx::query_builder::Separated;
use sqlx::FromRow;

use zatrano_core::types::{DbId, SortPolicy};

/// A soft-deletable table with the shared audit columns.
///
/// Every column name the generic SQL builders interpolate comes from one
/// of these constants, never from caller input.
pub trait Table: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    /// Table name.
    const NAME: &'static str;
    /// Singular entity name used in error messages.
    const ENTITY: &'static str;
    /// Sortable columns and the fallback column.
    const SORT: SortPolicy;
    /// Columns accepted in list filters and bulk conditions.
    const FILTERABLE: &'static [&'static str];
    /// Columns accepted in partial updates.
    const UPDATABLE: &'static [&'static str];

    /// Primary key of this row.
    fn id(&self) -> DbId;
}

/// A table whose rows can be inserted from a plain payload.
pub trait Insertable: Table {
    /// Insert payload.
    type New: Send + Sync + 'static;

    /// Columns written on insert, in the order
    /// [`push_insert_values`](Self::push_insert_values) binds them.
    const INSERT_COLUMNS: &'static [&'static str];

    /// Bind one payload's values, one per entry of `INSERT_COLUMNS`.
    fn push_insert_values<'args>(
        new: &'args Self::New,
        row: &mut Separated<'_, 'args, Postgres, &'static str>,
    );
}
