//! Generic repository behavior over the reference tables and users.

mod common;

use sqlx::PgPool;

use zatrano_core::config::PaginationConfig;
use zatrano_core::error::ErrorKind;
use zatrano_core::traits::Repository;
use zatrano_core::types::{FieldValue, FilterField, ListParams, SortDirection, field_map};
use zatrano_database::{BankRepository, DatabasePool, SocialMediaRepository, UserRepository};
use zatrano_entity::reference::{Bank, CreateBank, CreateSocialMedia};
use zatrano_entity::user::{CreateUser, UserType};

use common::{all_rows, seed_user};

async fn create_then_delete<R>(repo: &R, new: &CreateBank) -> Bank
where
    R: Repository<Bank, CreateBank>,
{
    let created = repo.create(new).await.unwrap();
    let found = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(found.name, new.name);
    repo.delete(created.id).await.unwrap();
    created
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_crud_through_repository_trait(pool: PgPool) {
    let repo = BankRepository::new(pool.clone());

    let deleted = create_then_delete(&repo, &CreateBank::new("Akbank")).await;

    let err = repo.find_by_id(deleted.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    let err = repo.delete(deleted.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Precondition);
    assert_eq!(repo.count().await.unwrap(), 0);
    assert_eq!(all_rows(&pool, "banks").await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_update_stamps_actor(pool: PgPool) {
    let actor = seed_user(&pool, "admin@zatrano.test").await;
    let repo = BankRepository::new(pool.clone());
    let bank = repo.create(&CreateBank::new("Halkbank")).await.unwrap();

    repo.update(
        bank.id,
        &field_map([("name", FieldValue::from("Halk")), ("is_active", false.into())]),
        actor.id,
    )
    .await
    .unwrap();

    let updated = repo.find_by_id(bank.id).await.unwrap();
    assert_eq!(updated.name, "Halk");
    assert!(!updated.is_active);
    assert_eq!(updated.updated_by, Some(actor.id));
    assert!(updated.updated_at >= bank.updated_at);

    let err = repo
        .update(9_999, &field_map([("name", "x")]), actor.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Precondition);

    let err = repo
        .update(bank.id, &field_map([("deleted_at", FieldValue::Null)]), actor.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_bulk_operations(pool: PgPool) {
    let repo = BankRepository::new(pool.clone());

    let mut dormant = CreateBank::new("Dormant");
    dormant.is_active = false;
    let created = repo
        .bulk_create(&[
            CreateBank::new("Ziraat"),
            CreateBank::new("Garanti"),
            CreateBank::new("Vakif"),
            dormant,
        ])
        .await
        .unwrap();
    assert_eq!(created.len(), 4);
    assert_eq!(repo.count().await.unwrap(), 4);
    assert!(repo.bulk_create(&[]).await.unwrap().is_empty());

    let renamed = repo
        .bulk_update(
            &field_map([("is_active", false)]),
            &field_map([("name", "Closed")]),
            1,
        )
        .await
        .unwrap();
    assert_eq!(renamed, 1);

    let removed = repo
        .bulk_delete(&field_map([("is_active", true)]))
        .await
        .unwrap();
    assert_eq!(removed, 3);
    assert_eq!(repo.count().await.unwrap(), 1);

    let err = repo.bulk_delete(&field_map::<&str, bool, _>([])).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(repo.count().await.unwrap(), 1);

    let survivor = created.iter().find(|bank| !bank.is_active).unwrap();
    assert_eq!(repo.find_by_id(survivor.id).await.unwrap().name, "Closed");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_delete_many_skips_missing_rows(pool: PgPool) {
    let repo = SocialMediaRepository::new(pool.clone());
    let created = repo
        .bulk_create(&[
            CreateSocialMedia::new("Instagram", Some("fa-instagram")),
            CreateSocialMedia::new("X", None),
        ])
        .await
        .unwrap();
    let ids: Vec<_> = created.iter().map(|row| row.id).collect();

    assert_eq!(repo.delete_many(&[ids[0], 77_777]).await.unwrap(), 1);
    assert_eq!(repo.delete_many(&ids).await.unwrap(), 1);
    assert_eq!(repo.delete_many(&[]).await.unwrap(), 0);
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_list_pages_sorts_and_filters(pool: PgPool) {
    let repo = BankRepository::new(pool.clone());
    let names = ["Ziraat", "Akbank", "Garanti", "Vakif", "Halkbank"];
    repo.bulk_create(&names.map(CreateBank::new)).await.unwrap();

    let page = repo
        .find_all(&ListParams::new().per_page(2).sort("name", SortDirection::Desc))
        .await
        .unwrap();
    assert_eq!(page.meta.total_items, 5);
    assert_eq!(page.meta.total_pages, 3);
    assert_eq!(page.meta.current_page, 1);
    let first: Vec<_> = page.data.iter().map(|bank| bank.name.as_str()).collect();
    assert_eq!(first, vec!["Ziraat", "Vakif"]);

    // Unknown sort columns fall back to the default instead of failing.
    let fallback = repo
        .find_all(&ListParams::new().sort("name; DROP TABLE banks", SortDirection::Asc))
        .await
        .unwrap();
    let ids: Vec<_> = fallback.data.iter().map(|bank| bank.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert_eq!(all_rows(&pool, "banks").await, 5);

    let filtered = repo
        .find_all(&ListParams::new().filter(FilterField::contains("name", "BANK")))
        .await
        .unwrap();
    assert_eq!(filtered.meta.total_items, 2);

    let beyond = repo
        .find_all(&ListParams::new().page(10).per_page(2))
        .await
        .unwrap();
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.meta.total_items, 5);

    let err = repo
        .find_all(&ListParams::new().filter(FilterField::eq("deleted_at", "x")))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_empty_table_lists_nothing(pool: PgPool) {
    let repo = BankRepository::new(pool);
    let page = repo.find_all(&ListParams::new()).await.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.meta.total_items, 0);
    assert_eq!(page.meta.total_pages, 0);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_user_email_is_unique_among_live_users(pool: PgPool) {
    let repo = UserRepository::new(pool.clone());
    let new_user = CreateUser {
        name: "Operator".into(),
        email: "ops@zatrano.test".into(),
        password_hash: Some("$argon2id$stub".into()),
        user_type: UserType::Dashboard,
        is_active: true,
        email_verified: true,
    };

    let user = repo.create(&new_user).await.unwrap();
    assert_eq!(user.user_type, UserType::Dashboard);

    let err = repo.create(&new_user).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ConstraintViolation);

    repo.delete(user.id).await.unwrap();
    let again = repo.create(&new_user).await.unwrap();
    assert_ne!(again.id, user.id);

    let dashboards = repo
        .find_all(&ListParams::new().filter(FilterField::eq("user_type", "dashboard")))
        .await
        .unwrap();
    assert_eq!(dashboards.meta.total_items, 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_json_range_filter_on_timestamp_column(pool: PgPool) {
    let repo = BankRepository::new(pool.clone());
    repo.create(&CreateBank::new("Ziraat")).await.unwrap();

    let params: ListParams = serde_json::from_str(
        r#"{"filters": [{"field": "created_at", "op": "gte", "value": "2000-01-01T00:00:00Z"}]}"#,
    )
    .unwrap();
    let page = repo.find_all(&params).await.unwrap();
    assert_eq!(page.meta.total_items, 1);

    let params: ListParams = serde_json::from_str(
        r#"{"filters": [{"field": "created_at", "op": "lt", "value": "2000-01-01T00:00:00Z"}]}"#,
    )
    .unwrap();
    let page = repo.find_all(&params).await.unwrap();
    assert_eq!(page.meta.total_items, 0);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_far_page_is_empty_not_an_error(pool: PgPool) {
    let repo = BankRepository::new(pool.clone());
    repo.create(&CreateBank::new("Ziraat")).await.unwrap();

    let page = repo
        .find_all(&ListParams::new().page(i64::MAX / 2).per_page(25))
        .await
        .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.meta.total_items, 1);
    assert_eq!(page.meta.current_page, (i64::MAX / 2) as u64);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_configured_page_bounds_apply_to_listing(pool: PgPool) {
    let repo = BankRepository::new(pool.clone()).with_pagination(PaginationConfig {
        default_per_page: 2,
        max_per_page: 3,
    });
    for name in ["Akbank", "Garanti", "Halkbank", "Ziraat", "Vakif"] {
        repo.create(&CreateBank::new(name)).await.unwrap();
    }

    let page = repo.find_all(&ListParams::new()).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.per_page, 2);
    assert_eq!(page.meta.total_pages, 3);

    let page = repo
        .find_all(&ListParams::new().per_page(50))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 3);
    assert_eq!(page.meta.per_page, 3);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_pool_health_check(pool: PgPool) {
    let db = DatabasePool::from_pool(pool);
    assert!(db.health_check().await.unwrap());

    let banks = BankRepository::new(db.pool().clone());
    assert_eq!(banks.count().await.unwrap(), 0);

    db.close().await;
    let err = db.health_check().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::StoreUnavailable);
}
