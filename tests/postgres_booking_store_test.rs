//! PostgreSQLアダプターの統合テスト
//!
//! 実行には DATABASE_URL で接続できるデータベースが必要:
//! `cargo test -- --ignored`

use chrono::{Duration, Utc};
use serial_test::serial;
use shareit_booking::adapters::postgres::{
    PostgresBookingStore, PostgresItemCatalog, PostgresUserDirectory,
};
use shareit_booking::application::booking::{
    BookingApplicationError, ServiceDependencies, approve_booking, create_booking, get_booking,
    list_for_owner,
};
use shareit_booking::domain::booking::NewBooking;
use shareit_booking::domain::commands::*;
use shareit_booking::domain::value_objects::*;
use shareit_booking::ports::*;
use sqlx::PgPool;
use std::sync::Arc;

mod common;

struct Fixture {
    pool: PgPool,
    booker: UserId,
    owner: UserId,
    item: ItemId,
}

/// データベースを初期化し、予約者・所有者・アイテムを登録する
async fn setup() -> Fixture {
    let pool = common::create_test_pool().await;
    common::cleanup_database(&pool).await;

    let booker = common::insert_user(&pool, "booker").await;
    let owner = common::insert_user(&pool, "owner").await;
    let item = common::insert_item(&pool, owner, true).await;

    Fixture {
        pool,
        booker: UserId::new(booker),
        owner: UserId::new(owner),
        item: ItemId::new(item),
    }
}

fn deps(pool: &PgPool) -> ServiceDependencies {
    ServiceDependencies {
        booking_store: Arc::new(PostgresBookingStore::new(pool.clone())),
        user_directory: Arc::new(PostgresUserDirectory::new(pool.clone())),
        item_catalog: Arc::new(PostgresItemCatalog::new(pool.clone())),
    }
}

fn new_booking(fx: &Fixture, start_in_hours: i64, status: BookingStatus) -> NewBooking {
    let start = Utc::now() + Duration::hours(start_in_hours);
    let end = start + Duration::hours(1);
    NewBooking {
        item_id: fx.item,
        booker_id: fx.booker,
        period: BookingPeriod::new(start, end).unwrap(),
        status,
    }
}

// ============================================================================
// アダプター単体
// ============================================================================

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_user_directory_and_item_catalog() {
    let fx = setup().await;

    let users = PostgresUserDirectory::new(fx.pool.clone());
    assert!(users.exists(fx.booker).await.unwrap());
    assert!(!users.exists(UserId::new(9999)).await.unwrap());

    let catalog = PostgresItemCatalog::new(fx.pool.clone());
    let item = catalog.get(fx.item).await.unwrap().unwrap();
    assert_eq!(item.owner_id, fx.owner);
    assert!(item.available);
    assert!(catalog.get(ItemId::new(9999)).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_save_and_find() {
    let fx = setup().await;
    let store = PostgresBookingStore::new(fx.pool.clone());

    let saved = store
        .save(new_booking(&fx, 1, BookingStatus::Waiting))
        .await
        .unwrap();

    let found = store.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(found.id, saved.id);
    assert_eq!(found.status, BookingStatus::Waiting);
    assert_eq!(found.booker_id, fx.booker);
    let missing = store.find_by_id(BookingId::new(9999)).await.unwrap();
    assert!(missing.is_none());

    let by_booker = store.find_by_booker(fx.booker).await.unwrap();
    assert_eq!(by_booker.len(), 1);

    let by_owner = store.find_by_item_owner(fx.owner).await.unwrap();
    assert_eq!(by_owner.len(), 1);
    let not_owned = store.find_by_item_owner(fx.booker).await.unwrap();
    assert!(not_owned.is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_decide_if_waiting_is_conditional() {
    let fx = setup().await;
    let store = PostgresBookingStore::new(fx.pool.clone());
    let saved = store
        .save(new_booking(&fx, 1, BookingStatus::Waiting))
        .await
        .unwrap();

    let decided = store
        .decide_if_waiting(saved.id, BookingStatus::Rejected)
        .await
        .unwrap();
    assert_eq!(decided.unwrap().status, BookingStatus::Rejected);

    let again = store
        .decide_if_waiting(saved.id, BookingStatus::Approved)
        .await
        .unwrap();
    assert!(again.is_none());

    let stored = store.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Rejected);
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_last_and_next_approved() {
    let fx = setup().await;
    let store = PostgresBookingStore::new(fx.pool.clone());

    let last = store
        .save(new_booking(&fx, -5, BookingStatus::Approved))
        .await
        .unwrap();
    store
        .save(new_booking(&fx, -10, BookingStatus::Approved))
        .await
        .unwrap();
    store
        .save(new_booking(&fx, 2, BookingStatus::Rejected))
        .await
        .unwrap();
    let next = store
        .save(new_booking(&fx, 5, BookingStatus::Approved))
        .await
        .unwrap();

    let now = Utc::now();
    let window = store.last_and_next_approved(fx.item, now).await.unwrap();
    assert_eq!(window.last.map(|b| b.id), Some(last.id));
    assert_eq!(window.next.map(|b| b.id), Some(next.id));

    let booker_finished = store.has_finished_booking(fx.booker, fx.item, now).await;
    let owner_finished = store.has_finished_booking(fx.owner, fx.item, now).await;
    assert!(booker_finished.unwrap());
    assert!(!owner_finished.unwrap());
}

// ============================================================================
// サービス経由
// ============================================================================

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_booking_flow_against_postgres() {
    let fx = setup().await;
    let deps = deps(&fx.pool);
    let now = Utc::now();
    let period = BookingPeriod::new(now + Duration::hours(1), now + Duration::hours(2));

    let booking = create_booking(
        &deps,
        RequestBooking {
            booker_id: fx.booker,
            item_id: fx.item,
            period: period.unwrap(),
        },
    )
    .await
    .unwrap();
    assert_eq!(booking.status, BookingStatus::Waiting);

    let err = approve_booking(
        &deps,
        DecideBooking {
            actor_id: fx.booker,
            booking_id: booking.id,
            approved: true,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, BookingApplicationError::NotItemOwner));

    let approved = approve_booking(
        &deps,
        DecideBooking {
            actor_id: fx.owner,
            booking_id: booking.id,
            approved: true,
        },
    )
    .await
    .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let fetched = get_booking(&deps, fx.owner, booking.id).await.unwrap();
    assert_eq!(fetched.status, BookingStatus::Approved);

    let listed = list_for_owner(&deps, fx.owner, Some("future"), Utc::now())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, booking.id);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_approvals_against_postgres() {
    let fx = setup().await;
    let deps = deps(&fx.pool);
    let booking_id = deps
        .booking_store
        .save(new_booking(&fx, 1, BookingStatus::Waiting))
        .await
        .unwrap()
        .id;

    let calls = (0..6).map(|i| {
        let deps = deps.clone();
        let owner = fx.owner;
        tokio::spawn(async move {
            approve_booking(
                &deps,
                DecideBooking {
                    actor_id: owner,
                    booking_id,
                    approved: i % 2 == 0,
                },
            )
            .await
        })
    });

    let results: Vec<_> = futures::future::join_all(calls)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);

    let store = &deps.booking_store;
    let stored = store.find_by_id(booking_id).await.unwrap().unwrap();
    assert_eq!(stored.status, winners[0].status);
}
