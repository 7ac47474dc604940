//! Identifier types.

/// Surrogate primary key shared by every table (`BIGSERIAL`).
pub type DbId = i64;

/// Actor reference stamped into `updated_by` on writes.
pub type ActorId = DbId;
