use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, BookingPeriod, BookingState, ItemId, UserId};

/// コマンド：アイテムの予約を申し込む
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBooking {
    pub booker_id: UserId,
    pub item_id: ItemId,
    pub period: BookingPeriod,
}

/// コマンド：予約を承認または却下する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideBooking {
    pub actor_id: UserId,
    pub booking_id: BookingId,
    pub approved: bool,
}

/// 一覧の視点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListPerspective {
    /// 予約者として
    Booker,
    /// アイテム所有者として
    Owner,
}

/// クエリ：予約一覧を取得する
///
/// `as_of`を基準時刻として時間区分を判定する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBookings {
    pub subject_id: UserId,
    pub perspective: ListPerspective,
    pub state: BookingState,
    pub as_of: DateTime<Utc>,
}
