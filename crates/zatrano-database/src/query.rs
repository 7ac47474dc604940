//! SQL builders for listing, counting and mutating [`Table`] rows.
//!
//! Identifiers are only ever taken from the `Table` constants; caller
//! values are always bound as parameters.

use sqlx::{Postgres, QueryBuilder};

use zatrano_core::error::AppError;
use zatrano_core::result::AppResult;
use zatrano_core::types::{
    ActorId, DbId, FieldMap, FieldValue, FilterField, FilterOp, FilterValue, ListParams,
    PageRequest,
};

use crate::table::{Insertable, Table};

/// Page query: live rows, validated filters, allow-listed ordering with an
/// `id` tie-break, then `LIMIT` / `OFFSET`.
pub fn list_query<'a, T: Table>(
    params: &'a ListParams,
    page: &PageRequest,
) -> AppResult<QueryBuilder<'a, Postgres>> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT * FROM {} WHERE deleted_at IS NULL",
        T::NAME
    ));
    push_filters::<T>(&mut qb, &params.filters)?;

    let column = T::SORT.resolve(params.sort_by.as_deref());
    let direction = params.direction().as_sql();
    qb.push(" ORDER BY ").push(column).push(" ").push(direction);
    if column != "id" {
        qb.push(", id ").push(direction);
    }

    qb.push(" LIMIT ")
        .push_bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .push(" OFFSET ")
        .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
    Ok(qb)
}

/// Count query over the same filters as [`list_query`], without bounds.
pub fn count_query<'a, T: Table>(
    filters: &'a [FilterField],
) -> AppResult<QueryBuilder<'a, Postgres>> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT COUNT(*) FROM {} WHERE deleted_at IS NULL",
        T::NAME
    ));
    push_filters::<T>(&mut qb, filters)?;
    Ok(qb)
}

/// Multi-row `INSERT ... RETURNING *`. `rows` must not be empty.
pub fn insert_query<'a, T: Insertable>(rows: &'a [T::New]) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) ",
        T::NAME,
        T::INSERT_COLUMNS.join(", ")
    ));
    qb.push_values(rows, |mut row, new| T::push_insert_values(new, &mut row));
    qb.push(" RETURNING *");
    qb
}

/// Start an `UPDATE` that overwrites every listed column at once.
///
/// The caller binds one value per column into a `separated(", ")` and then
/// calls [`overwrite_suffix`].
pub fn overwrite_prefix<'a>(table: &str, columns: &[&str]) -> QueryBuilder<'a, Postgres> {
    QueryBuilder::new(format!(
        "UPDATE {table} SET ({}) = ROW(",
        columns.join(", ")
    ))
}

/// Close a query started by [`overwrite_prefix`] and scope it to one live row.
pub fn overwrite_suffix(qb: &mut QueryBuilder<'_, Postgres>, id: DbId, updated_by: ActorId) {
    qb.push("), updated_by = ")
        .push_bind(updated_by)
        .push(", updated_at = NOW() WHERE id = ")
        .push_bind(id)
        .push(" AND deleted_at IS NULL");
}

/// Overwrite all insertable columns of one live row.
pub fn overwrite_query<'a, T: Insertable>(
    id: DbId,
    new: &'a T::New,
    updated_by: ActorId,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = overwrite_prefix(T::NAME, T::INSERT_COLUMNS);
    {
        let mut row = qb.separated(", ");
        T::push_insert_values(new, &mut row);
    }
    overwrite_suffix(&mut qb, id, updated_by);
    qb
}

/// Partial update of one live row.
pub fn update_query<'a, T: Table>(
    id: DbId,
    changes: &'a FieldMap,
    updated_by: ActorId,
) -> AppResult<QueryBuilder<'a, Postgres>> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", T::NAME));
    push_assignments::<T>(&mut qb, changes, updated_by)?;
    qb.push(" WHERE id = ")
        .push_bind(id)
        .push(" AND deleted_at IS NULL");
    Ok(qb)
}

/// Partial update of every live row matching `condition`.
pub fn bulk_update_query<'a, T: Table>(
    condition: &'a FieldMap,
    changes: &'a FieldMap,
    updated_by: ActorId,
) -> AppResult<QueryBuilder<'a, Postgres>> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", T::NAME));
    push_assignments::<T>(&mut qb, changes, updated_by)?;
    qb.push(" WHERE deleted_at IS NULL");
    push_condition::<T>(&mut qb, condition)?;
    Ok(qb)
}

/// Soft-delete every live row matching `condition`.
pub fn bulk_delete_query<'a, T: Table>(
    condition: &'a FieldMap,
) -> AppResult<QueryBuilder<'a, Postgres>> {
    let mut qb = QueryBuilder::new(format!(
        "UPDATE {} SET deleted_at = NOW(), updated_at = NOW() WHERE deleted_at IS NULL",
        T::NAME
    ));
    push_condition::<T>(&mut qb, condition)?;
    Ok(qb)
}

fn allowed_column(
    allowed: &'static [&'static str],
    requested: &str,
    entity: &str,
    purpose: &str,
) -> AppResult<&'static str> {
    allowed
        .iter()
        .copied()
        .find(|column| *column == requested)
        .ok_or_else(|| {
            AppError::validation(format!(
                "Column '{requested}' cannot be used as a {purpose} on {entity}"
            ))
        })
}

fn push_filters<'a, T: Table>(
    qb: &mut QueryBuilder<'a, Postgres>,
    filters: &'a [FilterField],
) -> AppResult<()> {
    for filter in filters {
        let column = allowed_column(T::FILTERABLE, &filter.field, T::ENTITY, "filter")?;
        qb.push(" AND ").push(column);

        match (filter.op, &filter.value) {
            (FilterOp::IsNull | FilterOp::IsNotNull, _) => {
                qb.push(" ").push(filter.op.as_sql());
            }
            (FilterOp::In, FilterValue::IntegerList(values)) => {
                qb.push(" = ANY(").push_bind(values.as_slice()).push(")");
            }
            (FilterOp::In, FilterValue::StringList(values)) => {
                qb.push(" = ANY(").push_bind(values.as_slice()).push(")");
            }
            (FilterOp::In, _)
            | (_, FilterValue::Null | FilterValue::IntegerList(_) | FilterValue::StringList(_)) => {
                return Err(AppError::validation(format!(
                    "Filter on '{column}' has a value that does not fit its operator"
                )));
            }
            (op, value) => {
                qb.push(" ").push(op.as_sql()).push(" ");
                push_filter_value(qb, value);
            }
        }
    }
    Ok(())
}

fn push_filter_value<'a>(qb: &mut QueryBuilder<'a, Postgres>, value: &'a FilterValue) {
    match value {
        FilterValue::Boolean(v) => qb.push_bind(*v),
        FilterValue::Integer(v) => qb.push_bind(*v),
        FilterValue::Float(v) => qb.push_bind(*v),
        FilterValue::String(v) => qb.push_bind(v.as_str()),
        FilterValue::Timestamp(v) => qb.push_bind(*v),
        FilterValue::Null | FilterValue::IntegerList(_) | FilterValue::StringList(_) => {
            qb.push("NULL")
        }
    };
}

fn push_field_value<'a>(qb: &mut QueryBuilder<'a, Postgres>, value: &'a FieldValue) {
    match value {
        FieldValue::Null => qb.push("NULL"),
        FieldValue::Bool(v) => qb.push_bind(*v),
        FieldValue::Integer(v) => qb.push_bind(*v),
        FieldValue::Float(v) => qb.push_bind(*v),
        FieldValue::Text(v) => qb.push_bind(v.as_str()),
        FieldValue::Timestamp(v) => qb.push_bind(*v),
    };
}

fn push_assignments<'a, T: Table>(
    qb: &mut QueryBuilder<'a, Postgres>,
    changes: &'a FieldMap,
    updated_by: ActorId,
) -> AppResult<()> {
    if changes.is_empty() {
        return Err(AppError::validation(format!(
            "No columns to update on {}",
            T::ENTITY
        )));
    }
    for (column, value) in changes {
        let column = allowed_column(T::UPDATABLE, column, T::ENTITY, "update target")?;
        qb.push(column).push(" = ");
        push_field_value(qb, value);
        qb.push(", ");
    }
    qb.push("updated_by = ")
        .push_bind(updated_by)
        .push(", updated_at = NOW()");
    Ok(())
}

fn push_condition<'a, T: Table>(
    qb: &mut QueryBuilder<'a, Postgres>,
    condition: &'a FieldMap,
) -> AppResult<()> {
    if condition.is_empty() {
        return Err(AppError::validation(format!(
            "Bulk changes to {} require a non-empty condition",
            T::NAME
        )));
    }
    for (column, value) in condition {
        let column = allowed_column(T::FILTERABLE, column, T::ENTITY, "condition")?;
        qb.push(" AND ").push(column);
        if let FieldValue::Null = value {
            qb.push(" IS NULL");
        } else {
            qb.push(" = ");
            push_field_value(qb, value);
        }
    }
    Ok(())
}
