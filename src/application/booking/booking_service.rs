use crate::domain::{
    self,
    authorization,
    booking::{Booking, ItemSnapshot},
    commands::*,
    value_objects::*,
};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
/// 共有される可変状態はBookingStoreの中にのみ存在する。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub booking_store: Arc<dyn BookingStore>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub item_catalog: Arc<dyn ItemCatalog>,
}

/// ユーザーの存在を確認するヘルパー関数
///
/// # エラー
/// - UserDirectoryError: 問い合わせ失敗
/// - UserNotFound: ユーザーが存在しない
pub(super) async fn ensure_user_exists(deps: &ServiceDependencies, user_id: UserId) -> Result<()> {
    let exists = deps
        .user_directory
        .exists(user_id)
        .await
        .map_err(BookingApplicationError::UserDirectoryError)?;

    if !exists {
        tracing::debug!(user_id = user_id.value(), "user not found");
        return Err(BookingApplicationError::UserNotFound);
    }

    Ok(())
}

/// カタログからアイテムを取得するヘルパー関数
async fn load_item(deps: &ServiceDependencies, item_id: ItemId) -> Result<ItemSnapshot> {
    deps.item_catalog
        .get(item_id)
        .await
        .map_err(BookingApplicationError::ItemCatalogError)?
        .ok_or(BookingApplicationError::ItemNotFound)
}

/// ストアから予約を取得するヘルパー関数
///
/// approve_booking, get_bookingで共通利用される。
async fn load_booking(deps: &ServiceDependencies, booking_id: BookingId) -> Result<Booking> {
    deps.booking_store
        .find_by_id(booking_id)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?
        .ok_or(BookingApplicationError::BookingNotFound)
}

/// アイテムの予約を申し込む
///
/// ビジネスルール：
/// - 予約者が存在すること
/// - アイテムが存在すること
/// - 自分のアイテムではないこと
/// - アイテムが貸出可能であること
///
/// 期間の妥当性（start < end）は`BookingPeriod`の型で保証される。
/// 同じアイテム・期間の既存予約との重複は確認しない。
///
/// # 戻り値
/// 保存されたWAITINGの予約
pub async fn create_booking(deps: &ServiceDependencies, cmd: RequestBooking) -> Result<Booking> {
    // 1. 予約者の存在確認
    ensure_user_exists(deps, cmd.booker_id).await?;

    // 2. アイテムの存在確認
    let item = load_item(deps, cmd.item_id).await?;

    // 3. ドメイン層の純粋関数を呼び出し（自己予約・貸出可否の確認）
    let new_booking = domain::booking::request_booking(cmd.booker_id, &item, cmd.period)
        .inspect_err(|e| {
            tracing::debug!(
                booker_id = cmd.booker_id.value(),
                item_id = cmd.item_id.value(),
                "booking request rejected: {:?}",
                e
            );
        })?;

    // 4. ストアに保存
    let booking = deps
        .booking_store
        .save(new_booking)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    tracing::info!(
        booking_id = booking.id.value(),
        booker_id = booking.booker_id.value(),
        item_id = booking.item_id.value(),
        "booking created"
    );

    Ok(booking)
}

/// 予約を承認または却下する
///
/// ビジネスルール：
/// - 予約が存在すること
/// - 操作者がアイテムの所有者であること
/// - 予約がWAITINGであること
///
/// # 一貫性保証
///
/// statusの更新はストアの条件付き更新で行う。
/// 同じ予約への同時呼び出しでは一方のみが成功し、
/// もう一方は`AlreadyDecided`で失敗する。
pub async fn approve_booking(deps: &ServiceDependencies, cmd: DecideBooking) -> Result<Booking> {
    // 1. 予約を取得
    let booking = load_booking(deps, cmd.booking_id).await?;

    // 2. 所有者の確認
    let item = load_item(deps, booking.item_id).await?;
    if !authorization::may_approve(&booking, cmd.actor_id, item.owner_id) {
        tracing::warn!(
            booking_id = booking.id.value(),
            actor_id = cmd.actor_id.value(),
            "approval attempted by non-owner"
        );
        return Err(BookingApplicationError::NotItemOwner);
    }

    // 3. ドメイン層の純粋関数を呼び出し（WAITINGであることの確認）
    let decided = domain::booking::decide_booking(&booking, cmd.approved)?;

    // 4. 条件付き更新（WAITINGのままの場合のみ）
    let updated = deps
        .booking_store
        .decide_if_waiting(booking.id, decided.status)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?
        .ok_or(BookingApplicationError::AlreadyDecided)?;

    tracing::info!(
        booking_id = updated.id.value(),
        status = updated.status.as_str(),
        "booking decided"
    );

    Ok(updated)
}

/// 予約をIDで取得する
///
/// 予約者と所有者のみ閲覧できる。
/// 権限がない場合も、存在しない場合と同じく`BookingNotFound`を返す。
pub async fn get_booking(
    deps: &ServiceDependencies,
    actor_id: UserId,
    booking_id: BookingId,
) -> Result<Booking> {
    let booking = load_booking(deps, booking_id).await?;

    if authorization::is_booker(&booking, actor_id) {
        return Ok(booking);
    }

    let item = load_item(deps, booking.item_id).await?;
    if !authorization::may_view(&booking, actor_id, item.owner_id) {
        return Err(BookingApplicationError::BookingNotFound);
    }

    Ok(booking)
}
