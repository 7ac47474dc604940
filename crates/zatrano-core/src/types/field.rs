//! Sparse field maps for partial updates and bulk conditions.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scalar column value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// SQL `NULL`.
    Null,
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A timestamp value. RFC 3339 text deserializes here, not as `Text`.
    Timestamp(DateTime<Utc>),
    /// A text value.
    Text(String),
}

/// `{column: new value}`, ordered by column name so generated SQL is stable.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Build a [`FieldMap`] from `(column, value)` pairs.
pub fn field_map<K, V, I>(pairs: I) -> FieldMap
where
    K: Into<String>,
    V: Into<FieldValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(column, value)| (column.into(), value.into()))
        .collect()
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_map_from_pairs() {
        let map = field_map([("name", FieldValue::from("Akbank")), ("is_active", false.into())]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["is_active"], FieldValue::Bool(false));
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["is_active", "name"]);
    }

    #[test]
    fn test_option_maps_to_null() {
        assert_eq!(FieldValue::from(None::<String>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(3i64)), FieldValue::Integer(3));
    }

    #[test]
    fn test_deserialize_sparse_map() {
        let map: FieldMap =
            serde_json::from_str(r#"{"name": "Garanti", "is_active": true, "icon": null}"#)
                .expect("deserialize");
        assert_eq!(map["name"], FieldValue::Text("Garanti".into()));
        assert_eq!(map["is_active"], FieldValue::Bool(true));
        assert_eq!(map["icon"], FieldValue::Null);
    }

    #[test]
    fn test_deserialize_timestamp_before_text() {
        let map: FieldMap = serde_json::from_str(
            r#"{"date": "2026-06-20T17:30:00+03:00", "venue": "Garden"}"#,
        )
        .expect("deserialize");
        let expected = "2026-06-20T14:30:00Z"
            .parse::<DateTime<Utc>>()
            .expect("valid timestamp");
        assert_eq!(map["date"], FieldValue::Timestamp(expected));
        assert_eq!(map["venue"], FieldValue::Text("Garden".into()));
    }
}
