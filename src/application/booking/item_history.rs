use crate::domain::value_objects::{ItemId, UserId};
use crate::ports::ItemBookingWindow;
use chrono::{DateTime, Utc};

use super::booking_service::ServiceDependencies;
use super::errors::{BookingApplicationError, Result};

/// アイテムの直前・直後の承認済み予約を取得する
///
/// アイテム詳細の表示（所有者向け）で使用される。
pub async fn item_booking_window(
    deps: &ServiceDependencies,
    item_id: ItemId,
    as_of: DateTime<Utc>,
) -> Result<ItemBookingWindow> {
    deps.booking_store
        .last_and_next_approved(item_id, as_of)
        .await
        .map_err(BookingApplicationError::BookingStoreError)
}

/// ユーザーがアイテムを借り終えているか
///
/// 承認済みかつ終了日時を過ぎた予約があれば真。
/// コメント投稿の可否判定で使用される。
pub async fn has_finished_booking(
    deps: &ServiceDependencies,
    user_id: UserId,
    item_id: ItemId,
    as_of: DateTime<Utc>,
) -> Result<bool> {
    deps.booking_store
        .has_finished_booking(user_id, item_id, as_of)
        .await
        .map_err(BookingApplicationError::BookingStoreError)
}
