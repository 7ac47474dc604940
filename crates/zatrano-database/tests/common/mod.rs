//! Fixtures shared by the database integration tests.
//!
//! Every test gets a fresh database from `#[sqlx::test]` with the schema in
//! `migrations/` applied.

#![allow(dead_code)]

use sqlx::PgPool;

use zatrano_database::{
    BankRepository, InvitationCategoryRepository, SocialMediaRepository, UserRepository,
};
use zatrano_entity::reference::{
    Bank, CreateBank, CreateInvitationCategory, CreateSocialMedia, InvitationCategory,
    SocialMedia,
};
use zatrano_entity::user::{CreateUser, User, UserType};

pub async fn seed_user(pool: &PgPool, email: &str) -> User {
    UserRepository::new(pool.clone())
        .create(&CreateUser {
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            password_hash: None,
            user_type: UserType::Panel,
            is_active: true,
            email_verified: false,
        })
        .await
        .expect("seed user")
}

pub async fn seed_bank(pool: &PgPool, name: &str) -> Bank {
    BankRepository::new(pool.clone())
        .create(&CreateBank::new(name))
        .await
        .expect("seed bank")
}

pub async fn seed_social_media(pool: &PgPool, name: &str) -> SocialMedia {
    SocialMediaRepository::new(pool.clone())
        .create(&CreateSocialMedia::new(name, Some("fa-link")))
        .await
        .expect("seed social media")
}

pub async fn seed_category(pool: &PgPool, name: &str) -> InvitationCategory {
    InvitationCategoryRepository::new(pool.clone())
        .create(&CreateInvitationCategory::new(name))
        .await
        .expect("seed invitation category")
}

/// Rows in `table`, deleted or not.
pub async fn all_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count rows")
}

/// Live child rows of one parent.
pub async fn live_children(pool: &PgPool, table: &str, parent_column: &str, parent_id: i64) -> i64 {
    sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM {table} WHERE {parent_column} = $1 AND deleted_at IS NULL"
    ))
    .bind(parent_id)
    .fetch_one(pool)
    .await
    .expect("count child rows")
}
