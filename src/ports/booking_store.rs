use crate::domain::{
    booking::{Booking, NewBooking},
    value_objects::{BookingId, BookingStatus, ItemId, UserId},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// アイテムの直前・直後の承認済み予約
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemBookingWindow {
    pub last: Option<Booking>,
    pub next: Option<Booking>,
}

/// 予約ストアポート
///
/// 予約レコードの唯一の正本を保持する。
/// 予約は削除されず、作成後に変更されるのはstatusのみ。
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// 新しい予約を保存し、IDを採番する
    async fn save(&self, booking: NewBooking) -> Result<Booking>;

    /// IDで予約を取得する
    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>>;

    /// 予約者の全予約を取得する
    ///
    /// 並び順は保証しない。
    async fn find_by_booker(&self, booker_id: UserId) -> Result<Vec<Booking>>;

    /// 所有するアイテムに対する全予約を取得する
    ///
    /// 並び順は保証しない。
    async fn find_by_item_owner(&self, owner_id: UserId) -> Result<Vec<Booking>>;

    /// WAITINGの予約のみstatusを更新する（条件付き更新）
    ///
    /// 判断済み、または存在しない場合は`None`を返す。
    /// 同じ予約に対する同時呼び出しのうち、成功するのは高々1つ。
    async fn decide_if_waiting(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>>;

    /// アイテムの直前・直後の承認済み予約を取得する
    ///
    /// last: start < now の中で開始が最も遅いもの
    /// next: start > now の中で開始が最も早いもの
    async fn last_and_next_approved(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<ItemBookingWindow>;

    /// ユーザーがアイテムの承認済み予約を終えているか
    async fn has_finished_booking(
        &self,
        user_id: UserId,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<bool>;
}
