use serde::{Deserialize, Serialize};

use super::{
    BookingId, BookingPeriod, BookingStatus, DecideBookingError, ItemId, RequestBookingError,
    UserId,
};

/// 予約集約 - 1つのアイテムに対する1回の予約
///
/// 作成後に変化するのはstatusのみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    // 識別子
    pub id: BookingId,

    // 他の集約への参照（IDのみ）
    pub item_id: ItemId,
    pub booker_id: UserId,

    pub period: BookingPeriod,
    pub status: BookingStatus,
}

/// 永続化前の予約（IDはストアが採番する）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub item_id: ItemId,
    pub booker_id: UserId,
    pub period: BookingPeriod,
    pub status: BookingStatus,
}

impl NewBooking {
    /// 採番されたIDを付与して予約集約にする
    pub fn with_id(self, id: BookingId) -> Booking {
        Booking {
            id,
            item_id: self.item_id,
            booker_id: self.booker_id,
            period: self.period,
            status: self.status,
        }
    }
}

/// カタログコンテキストから見えるアイテムの情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub item_id: ItemId,
    pub owner_id: UserId,
    pub available: bool,
}

/// 純粋関数：予約を申し込む
///
/// ビジネスルール：
/// - 自分が所有するアイテムは予約できない
/// - 貸出不可のアイテムは予約できない
/// - 状態はWAITING
/// - 同じ期間の既存予約との重複は確認しない
pub fn request_booking(
    booker_id: UserId,
    item: &ItemSnapshot,
    period: BookingPeriod,
) -> Result<NewBooking, RequestBookingError> {
    if item.owner_id == booker_id {
        return Err(RequestBookingError::OwnItem);
    }

    if !item.available {
        return Err(RequestBookingError::ItemUnavailable);
    }

    Ok(NewBooking {
        item_id: item.item_id,
        booker_id,
        period,
        status: BookingStatus::Waiting,
    })
}

/// 純粋関数：予約を承認または却下する
///
/// ビジネスルール：
/// - WAITINGの予約のみ判断できる（APPROVED/REJECTEDは終端）
/// - 変更されるのはstatusのみ
///
/// 所有者かどうかの判定は`authorization::may_approve`で行う。
pub fn decide_booking(booking: &Booking, approved: bool) -> Result<Booking, DecideBookingError> {
    if booking.status.is_terminal() {
        return Err(DecideBookingError::AlreadyDecided);
    }

    Ok(Booking {
        status: BookingStatus::from_decision(approved),
        ..booking.clone()
    })
}
