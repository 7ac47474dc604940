//! Filter types for list queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// SQL `ILIKE` case-insensitive pattern match.
    ILike,
    /// List membership (`= ANY(...)`).
    In,
    /// SQL `IS NULL` check.
    IsNull,
    /// SQL `IS NOT NULL` check.
    IsNotNull,
}

impl FilterOp {
    /// SQL comparison operator for binary operators.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::ILike => "ILIKE",
            Self::In => "= ANY",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }
}

/// A dynamic filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Null / no value (for `IS NULL`, `IS NOT NULL`).
    Null,
    /// A boolean value.
    Boolean(bool),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A point in time, for range filters on timestamp columns.
    ///
    /// Listed ahead of `String` so RFC 3339 text deserializes as a
    /// timestamp.
    Timestamp(DateTime<Utc>),
    /// A string value.
    String(String),
    /// A list of integer values (for `IN`).
    IntegerList(Vec<i64>),
    /// A list of string values (for `IN`).
    StringList(Vec<String>),
}

/// A single filter condition on a named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The column to filter on (validated against the entity's allow-list).
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    #[serde(default = "null_value")]
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Eq, value.into())
    }

    /// Shorthand for a case-insensitive substring filter.
    pub fn contains(field: impl Into<String>, needle: &str) -> Self {
        Self::new(field, FilterOp::ILike, FilterValue::String(format!("%{needle}%")))
    }

    /// Shorthand for an inclusive range filter on both ends.
    pub fn between(
        field: impl Into<String> + Clone,
        from: impl Into<FilterValue>,
        to: impl Into<FilterValue>,
    ) -> [Self; 2] {
        [
            Self::new(field.clone(), FilterOp::Gte, from.into()),
            Self::new(field, FilterOp::Lte, to.into()),
        ]
    }
}

fn null_value() -> FilterValue {
    FilterValue::Null
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}
