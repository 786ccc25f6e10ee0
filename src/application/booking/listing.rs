use crate::domain::{
    BookingState,
    booking::Booking,
    classifier,
    commands::{ListBookings, ListPerspective},
    value_objects::UserId,
};
use chrono::{DateTime, Utc};

use super::booking_service::{ServiceDependencies, ensure_user_exists};
use super::errors::{BookingApplicationError, Result};

/// 予約者としての予約一覧を取得する
///
/// `state`は大文字小文字を区別せずにパースする。
/// 未指定・未知の値は`InvalidState`。
pub async fn list_for_booker(
    deps: &ServiceDependencies,
    booker_id: UserId,
    state: Option<&str>,
    as_of: DateTime<Utc>,
) -> Result<Vec<Booking>> {
    list_for(deps, booker_id, ListPerspective::Booker, state, as_of).await
}

/// 所有者としての予約一覧を取得する
///
/// 所有するすべてのアイテムに対する予約が対象。
pub async fn list_for_owner(
    deps: &ServiceDependencies,
    owner_id: UserId,
    state: Option<&str>,
    as_of: DateTime<Utc>,
) -> Result<Vec<Booking>> {
    list_for(deps, owner_id, ListPerspective::Owner, state, as_of).await
}

/// 予約一覧を取得する（パース済みの状態フィルタ）
///
/// 処理フロー：
/// 1. 対象ユーザーの存在確認
/// 2. 視点に応じて全予約を取得
/// 3. 状態フィルタで絞り込み
/// 4. 開始日時の降順に並べる
///
/// 該当する予約がない場合は空のリストを返す。
pub async fn list_bookings(
    deps: &ServiceDependencies,
    query: ListBookings,
) -> Result<Vec<Booking>> {
    ensure_user_exists(deps, query.subject_id).await?;
    fetch_and_classify(deps, &query).await
}

async fn list_for(
    deps: &ServiceDependencies,
    subject_id: UserId,
    perspective: ListPerspective,
    state: Option<&str>,
    as_of: DateTime<Utc>,
) -> Result<Vec<Booking>> {
    ensure_user_exists(deps, subject_id).await?;

    let state = BookingState::from_param(state)?;

    let query = ListBookings {
        subject_id,
        perspective,
        state,
        as_of,
    };

    fetch_and_classify(deps, &query).await
}

async fn fetch_and_classify(
    deps: &ServiceDependencies,
    query: &ListBookings,
) -> Result<Vec<Booking>> {
    let subject_id = query.subject_id;
    let bookings = match query.perspective {
        ListPerspective::Booker => deps.booking_store.find_by_booker(subject_id).await,
        ListPerspective::Owner => deps.booking_store.find_by_item_owner(subject_id).await,
    }
    .map_err(BookingApplicationError::BookingStoreError)?;

    let listed = classifier::filter_and_sort(bookings, query.as_of, query.state);

    tracing::debug!(
        subject_id = subject_id.value(),
        perspective = ?query.perspective,
        state = %query.state,
        count = listed.len(),
        "bookings listed"
    );

    Ok(listed)
}
