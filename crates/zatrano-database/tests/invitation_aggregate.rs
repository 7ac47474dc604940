//! Invitation aggregate synchronization and key assignment against a live
//! PostgreSQL.

mod common;

use std::collections::HashSet;

use sqlx::PgPool;

use zatrano_core::config::KeyConfig;
use zatrano_core::error::ErrorKind;
use zatrano_core::types::{FieldMap, FilterField, ListParams};
use zatrano_database::InvitationRepository;
use zatrano_entity::invitation::{
    CreateInvitation, CreateInvitationDetail, CreateInvitationParticipant, InvitationAggregate,
};

use common::{all_rows, live_children, seed_category, seed_user};

fn wedding_detail(bride: &str, groom: &str) -> CreateInvitationDetail {
    CreateInvitationDetail {
        title: Some("Wedding".into()),
        bride_name: Some(bride.into()),
        groom_name: Some(groom.into()),
        is_father_live: false,
        ..CreateInvitationDetail::default()
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_create_assigns_key_and_writes_children(pool: PgPool) {
    let user = seed_user(&pool, "host@zatrano.test").await;
    let category = seed_category(&pool, "Wedding").await;
    let repo = InvitationRepository::new(pool.clone());

    let mut guest = CreateInvitationParticipant::new("Family", "+905550000003");
    guest.guest_count = 4;
    let aggregate = InvitationAggregate::new(CreateInvitation::new(user.id, category.id, "cover.png"))
        .with_detail(wedding_detail("Elif", "Can"))
        .with_participant(CreateInvitationParticipant::new("Aunt", "+905550000001"))
        .with_participant(CreateInvitationParticipant::new("Uncle", "+905550000002"))
        .with_participant(guest);

    let created = repo.create_with_relations(&aggregate).await.unwrap();
    assert_eq!(created.invitation_key.len(), 11);
    assert!(created.invitation_key.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(created.participants.len(), 3);
    assert!(created.detail.is_some());

    let loaded = repo.find_by_key(&created.invitation_key).await.unwrap();
    assert_eq!(loaded.id, created.id);
    let detail = loaded.detail.as_ref().unwrap();
    assert_eq!(detail.invitation_id, created.id);
    assert_eq!(detail.bride_name.as_deref(), Some("Elif"));
    assert!(detail.is_mother_live);
    assert!(!detail.is_father_live);
    assert_eq!(loaded.participants.len(), 3);
    assert_eq!(loaded.guest_total(), 6);

    assert!(repo.key_exists(&created.invitation_key).await.unwrap());
    assert!(!repo.key_exists("not-a-key").await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_update_keeps_key_and_replaces_children(pool: PgPool) {
    let user = seed_user(&pool, "editor@zatrano.test").await;
    let category = seed_category(&pool, "Engagement").await;
    let repo = InvitationRepository::new(pool.clone());

    let created = repo
        .create_with_relations(
            &InvitationAggregate::new(CreateInvitation::new(user.id, category.id, "old.png"))
                .with_detail(wedding_detail("Elif", "Can"))
                .with_participant(CreateInvitationParticipant::new("A", "1"))
                .with_participant(CreateInvitationParticipant::new("B", "2")),
        )
        .await
        .unwrap();

    let mut invitation = CreateInvitation::new(user.id, category.id, "new.png");
    invitation.venue = Some("Garden".into());
    let updated = repo
        .update_with_relations(
            created.id,
            &InvitationAggregate::new(invitation)
                .with_detail(wedding_detail("Deniz", "Ali"))
                .with_participant(CreateInvitationParticipant::new("C", "3")),
            user.id,
        )
        .await
        .unwrap();
    assert_eq!(updated.invitation_key, created.invitation_key);
    assert_eq!(updated.image, "new.png");
    assert_eq!(updated.venue.as_deref(), Some("Garden"));

    let loaded = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(loaded.invitation_key, created.invitation_key);
    assert_eq!(
        loaded.detail.as_ref().and_then(|d| d.bride_name.as_deref()),
        Some("Deniz")
    );
    let titles: Vec<_> = loaded.participants.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["C"]);
    assert_eq!(all_rows(&pool, "invitation_details").await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_update_without_detail_drops_it(pool: PgPool) {
    let user = seed_user(&pool, "nodetail@zatrano.test").await;
    let category = seed_category(&pool, "Birthday").await;
    let repo = InvitationRepository::new(pool.clone());

    let created = repo
        .create_with_relations(
            &InvitationAggregate::new(CreateInvitation::new(user.id, category.id, "a.png"))
                .with_detail(wedding_detail("Elif", "Can")),
        )
        .await
        .unwrap();

    repo.update_with_relations(
        created.id,
        &InvitationAggregate::new(CreateInvitation::new(user.id, category.id, "a.png")),
        user.id,
    )
    .await
    .unwrap();

    let loaded = repo.find_by_id(created.id).await.unwrap();
    assert!(loaded.detail.is_none());
    assert!(loaded.participants.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_rejected_participant_rolls_back_invitation(pool: PgPool) {
    let user = seed_user(&pool, "rollback@zatrano.test").await;
    let category = seed_category(&pool, "Wedding").await;
    let repo = InvitationRepository::new(pool.clone());

    let mut nobody = CreateInvitationParticipant::new("Nobody", "0");
    nobody.guest_count = 0;
    let aggregate = InvitationAggregate::new(CreateInvitation::new(user.id, category.id, "x.png"))
        .with_detail(wedding_detail("Elif", "Can"))
        .with_participant(nobody);

    let err = repo.create_with_relations(&aggregate).await.unwrap_err();
    assert!(
        matches!(
            err.kind,
            ErrorKind::ConstraintViolation | ErrorKind::TransactionFailure
        ),
        "unexpected error kind {:?}",
        err.kind
    );
    assert_eq!(all_rows(&pool, "invitations").await, 0);
    assert_eq!(all_rows(&pool, "invitation_details").await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_delete_tombstones_invitation_and_children(pool: PgPool) {
    let user = seed_user(&pool, "delete@zatrano.test").await;
    let category = seed_category(&pool, "Wedding").await;
    let repo = InvitationRepository::new(pool.clone());

    let created = repo
        .create_with_relations(
            &InvitationAggregate::new(CreateInvitation::new(user.id, category.id, "d.png"))
                .with_detail(wedding_detail("Elif", "Can"))
                .with_participant(CreateInvitationParticipant::new("A", "1")),
        )
        .await
        .unwrap();

    repo.delete_with_relations(created.id).await.unwrap();

    let err = repo.find_by_id(created.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    let err = repo.find_by_key(&created.invitation_key).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(
        live_children(&pool, "invitation_participants", "invitation_id", created.id).await,
        0
    );
    assert_eq!(
        live_children(&pool, "invitation_details", "invitation_id", created.id).await,
        0
    );

    // A deleted invitation still holds its key.
    assert!(repo.key_exists(&created.invitation_key).await.unwrap());

    let err = repo.delete_with_relations(created.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Precondition);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_keys_are_distinct_across_invitations(pool: PgPool) {
    let user = seed_user(&pool, "bulk@zatrano.test").await;
    let category = seed_category(&pool, "Party").await;
    let repo = InvitationRepository::new(pool.clone()).with_keys(&KeyConfig {
        length: 6,
        max_attempts: 16,
    });

    let mut keys = HashSet::new();
    for n in 0..50 {
        let created = repo
            .create_with_relations(&InvitationAggregate::new(CreateInvitation::new(
                user.id,
                category.id,
                format!("{n}.png"),
            )))
            .await
            .unwrap();
        assert_eq!(created.invitation_key.len(), 6);
        assert!(keys.insert(created.invitation_key));
    }
    assert_eq!(repo.count().await.unwrap(), 50);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_list_loads_detail_only(pool: PgPool) {
    let user = seed_user(&pool, "list@zatrano.test").await;
    let category = seed_category(&pool, "Wedding").await;
    let repo = InvitationRepository::new(pool.clone());

    for (image, confirmed) in [("one.png", false), ("two.png", true)] {
        let mut invitation = CreateInvitation::new(user.id, category.id, image);
        invitation.is_confirmed = confirmed;
        repo.create_with_relations(
            &InvitationAggregate::new(invitation)
                .with_detail(wedding_detail("Elif", "Can"))
                .with_participant(CreateInvitationParticipant::new("A", "1")),
        )
        .await
        .unwrap();
    }

    let page = repo
        .find_all(&ListParams::new().filter(FilterField::eq("is_confirmed", true)))
        .await
        .unwrap();
    assert_eq!(page.meta.total_items, 1);
    assert_eq!(page.data[0].image, "two.png");
    assert!(page.data[0].detail.is_some());
    assert!(page.data[0].participants.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL; set DATABASE_URL"]
async fn test_partial_update_of_event_date_from_json(pool: PgPool) {
    let user = seed_user(&pool, "date@zatrano.test").await;
    let category = seed_category(&pool, "Wedding").await;
    let repo = InvitationRepository::new(pool.clone());
    let created = repo
        .create_with_relations(&InvitationAggregate::new(CreateInvitation::new(
            user.id,
            category.id,
            "date.png",
        )))
        .await
        .unwrap();

    let changes: FieldMap =
        serde_json::from_str(r#"{"date": "2026-06-20T17:30:00+03:00", "time": "17:30"}"#)
            .unwrap();
    repo.update(created.id, &changes, user.id).await.unwrap();

    let loaded = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(
        loaded.date.map(|date| date.to_rfc3339()),
        Some("2026-06-20T14:30:00+00:00".to_string())
    );
    assert_eq!(loaded.time.as_deref(), Some("17:30"));
}
