//! # zatrano-entity
//!
//! Domain entity models for Zatrano. Every struct in this crate represents
//! a database table row or an insert payload. Row structs derive
//! `sqlx::FromRow` and carry the shared audit columns: `id`,
//! `created_at`, `updated_at`, the `deleted_at` tombstone and the
//! `updated_by` actor reference.
//!
//! Aggregate roots ([`card::Card`], [`invitation::Invitation`]) hold their
//! owned child rows in `#[sqlx(skip)]` fields that the repositories fill
//! in after loading the root.

pub mod card;
pub mod invitation;
pub mod reference;
pub mod user;
