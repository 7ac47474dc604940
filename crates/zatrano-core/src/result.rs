//! Convenience result type alias for Zatrano.

use crate::error::AppError;

/// A specialized `Result` type for Zatrano operations.
pub type AppResult<T> = Result<T, AppError>;
