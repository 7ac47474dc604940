//! Classification of sqlx failures into the application error taxonomy.

use zatrano_core::error::{AppError, ErrorKind};

/// Map a driver error to an [`AppError`], prefixing the operation name.
///
/// Integrity violations (SQLSTATE class `23`) become
/// [`ErrorKind::ConstraintViolation`] and carry the constraint name;
/// connection-level failures become [`ErrorKind::StoreUnavailable`].
pub fn map_sqlx_error(op: &str, err: sqlx::Error) -> AppError {
    let (kind, message) = match &err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, format!("{op}: no matching row")),
        sqlx::Error::Database(db) => {
            let kind = classify_sqlstate(db.code().as_deref());
            let message = match db.constraint() {
                Some(constraint) => format!("{op}: {} (constraint {constraint})", db.message()),
                None => format!("{op}: {}", db.message()),
            };
            (kind, message)
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_) => (ErrorKind::StoreUnavailable, format!("{op}: {err}")),
        _ => (ErrorKind::Database, format!("{op}: {err}")),
    };
    AppError::with_source(kind, message, err)
}

/// Kind for a PostgreSQL SQLSTATE code.
fn classify_sqlstate(code: Option<&str>) -> ErrorKind {
    match code {
        Some(code) if code.starts_with("23") => ErrorKind::ConstraintViolation,
        // admin_shutdown, crash_shutdown, cannot_connect_now
        Some("57P01" | "57P02" | "57P03") => ErrorKind::StoreUnavailable,
        Some(code) if code.starts_with("08") => ErrorKind::StoreUnavailable,
        _ => ErrorKind::Database,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = map_sqlx_error("find card 3", sqlx::Error::RowNotFound);
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.message.starts_with("find card 3"));
    }

    #[test]
    fn test_pool_failures_map_to_store_unavailable() {
        assert!(map_sqlx_error("list", sqlx::Error::PoolTimedOut).is(ErrorKind::StoreUnavailable));
        assert!(map_sqlx_error("list", sqlx::Error::PoolClosed).is(ErrorKind::StoreUnavailable));
        assert!(
            map_sqlx_error("list", sqlx::Error::Protocol("bad frame".into()))
                .is(ErrorKind::StoreUnavailable)
        );
    }

    #[test]
    fn test_other_failures_map_to_database() {
        let err = map_sqlx_error("list", sqlx::Error::ColumnNotFound("slug".into()));
        assert_eq!(err.kind, ErrorKind::Database);
    }

    #[test]
    fn test_sqlstate_classes() {
        assert_eq!(classify_sqlstate(Some("23505")), ErrorKind::ConstraintViolation);
        assert_eq!(classify_sqlstate(Some("23503")), ErrorKind::ConstraintViolation);
        assert_eq!(classify_sqlstate(Some("23502")), ErrorKind::ConstraintViolation);
        assert_eq!(classify_sqlstate(Some("08006")), ErrorKind::StoreUnavailable);
        assert_eq!(classify_sqlstate(Some("57P01")), ErrorKind::StoreUnavailable);
        assert_eq!(classify_sqlstate(Some("42P01")), ErrorKind::Database);
        assert_eq!(classify_sqlstate(None), ErrorKind::Database);
    }
}
