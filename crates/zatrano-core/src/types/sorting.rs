//! Sorting types and the per-entity sort allow-list.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Parse a caller-supplied direction; anything but `desc` is ascending.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Return the lowercase query-string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Allow-list of sortable columns for one entity.
///
/// Configured once per repository type; [`SortPolicy::resolve`] always
/// returns one of the listed identifiers, never the caller's text, so
/// `ORDER BY` can only ever see a known column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortPolicy {
    columns: &'static [&'static str],
    default_column: &'static str,
}

impl SortPolicy {
    /// Create a policy from the sortable columns and the fallback column.
    pub const fn new(columns: &'static [&'static str], default_column: &'static str) -> Self {
        Self {
            columns,
            default_column,
        }
    }

    /// Column to order by for the requested name.
    ///
    /// Unknown, empty or missing names silently fall back to the default.
    pub fn resolve(&self, requested: Option<&str>) -> &'static str {
        requested
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .and_then(|name| {
                self.columns
                    .iter()
                    .copied()
                    .find(|column| column.eq_ignore_ascii_case(name))
            })
            .unwrap_or(self.default_column)
    }

    /// Whether `column` is sortable.
    pub fn allows(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    /// The sortable columns.
    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    /// The fallback column.
    pub fn default_column(&self) -> &'static str {
        self.default_column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: SortPolicy =
        SortPolicy::new(&["id", "name", "slug", "is_active", "created_at"], "id");

    #[test]
    fn test_resolve_known_column() {
        assert_eq!(POLICY.resolve(Some("slug")), "slug");
        assert_eq!(POLICY.resolve(Some("  Name ")), "name");
    }

    #[test]
    fn test_resolve_falls_back_for_unknown_input() {
        assert_eq!(POLICY.resolve(None), "id");
        assert_eq!(POLICY.resolve(Some("")), "id");
        assert_eq!(POLICY.resolve(Some("password_hash")), "id");
        assert_eq!(POLICY.resolve(Some("name; DROP TABLE cards; --")), "id");
        assert_eq!(POLICY.resolve(Some("name DESC, (SELECT 1)")), "id");
    }

    #[test]
    fn test_resolved_column_is_always_listed() {
        for input in ["id", "NAME", "x", "created_at", "updated_at", "1=1"] {
            assert!(POLICY.allows(POLICY.resolve(Some(input))));
        }
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(SortDirection::parse_lenient("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse_lenient(" DESC "), SortDirection::Desc);
        assert_eq!(SortDirection::parse_lenient("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient("random"), SortDirection::Asc);
    }
}
