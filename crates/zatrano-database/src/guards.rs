//! Uniqueness guards for card slugs and invitation keys.
//!
//! Both guards are friendly pre-flight answers. The unique indexes on
//! `cards.slug` and `invitations.invitation_key` stay the final authority:
//! a racing writer that slips past a check is rejected by the store with a
//! `ConstraintViolation`.

use async_trait::async_trait;
use rand::Rng;
use rand::distr::Alphanumeric;
use sqlx::PgExecutor;
use sqlx::postgres::PgConnection;
use tracing::{debug, warn};

use zatrano_core::config::KeyConfig;
use zatrano_core::error::AppError;
use zatrano_core::result::AppResult;
use zatrano_core::types::DbId;

use crate::error::map_sqlx_error;

/// Whether `slug` is free for a card.
///
/// Soft-deleted cards still hold their slug. `exclude` is the id of the
/// card being edited, so a card never conflicts with itself; `None` or a
/// non-positive id checks against every card.
pub async fn slug_available<'e, E>(executor: E, slug: &str, exclude: Option<DbId>) -> AppResult<bool>
where
    E: PgExecutor<'e>,
{
    let exclude = exclude.filter(|id| *id > 0);
    let taken: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM cards WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)",
    )
    .bind(slug)
    .bind(exclude)
    .fetch_one(executor)
    .await
    .map_err(|e| map_sqlx_error("check slug availability", e))?;

    debug!(slug, ?exclude, taken, "Checked slug availability");
    Ok(taken == 0)
}

/// Existence check used by [`KeyGenerator::next_unique`].
#[async_trait]
pub trait KeyLookup: Send {
    /// Whether `key` is already assigned to an invitation.
    async fn key_exists(&mut self, key: &str) -> AppResult<bool>;
}

#[async_trait]
impl KeyLookup for PgConnection {
    async fn key_exists(&mut self, key: &str) -> AppResult<bool> {
        invitation_key_exists(&mut *self, key).await
    }
}

/// Whether any invitation, deleted or not, holds `key`.
pub async fn invitation_key_exists<'e, E>(executor: E, key: &str) -> AppResult<bool>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM invitations WHERE invitation_key = $1)")
        .bind(key)
        .fetch_one(executor)
        .await
        .map_err(|e| map_sqlx_error("check invitation key", e))
}

/// Random alphanumeric invitation keys with a bounded collision retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyGenerator {
    length: usize,
    max_attempts: u32,
}

impl KeyGenerator {
    /// Create a generator. Zero values are raised to one.
    pub fn new(length: usize, max_attempts: u32) -> Self {
        Self {
            length: length.max(1),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Create a generator from the `[keys]` configuration section.
    pub fn from_config(config: &KeyConfig) -> Self {
        Self::new(config.length, config.max_attempts)
    }

    /// Key length in characters.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Candidates tried before giving up.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draw one candidate from `[A-Za-z0-9]` using the thread-local CSPRNG.
    pub fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }

    /// Draw candidates until `lookup` reports one as unused.
    ///
    /// Gives up with `KeyExhausted` after `max_attempts` collisions.
    pub async fn next_unique<L>(&self, lookup: &mut L) -> AppResult<String>
    where
        L: KeyLookup + ?Sized,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generate();
            if !lookup.key_exists(&candidate).await? {
                return Ok(candidate);
            }
            warn!(
                attempt,
                max_attempts = self.max_attempts,
                "Invitation key collision, drawing another"
            );
        }

        Err(AppError::key_exhausted(format!(
            "No unused invitation key found after {} attempts",
            self.max_attempts
        )))
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::from_config(&KeyConfig::default())
    }
}
