//! 予約に対する操作権限の判定
//!
//! すべて純粋関数。状態もI/Oも持たない。
//! アイテムの所有者はカタログコンテキストから取得した値を渡す。

use super::{UserId, booking::Booking};

/// 予約者本人か
pub fn is_booker(booking: &Booking, user_id: UserId) -> bool {
    booking.booker_id == user_id
}

/// 予約対象アイテムの所有者か
pub fn is_owner(_booking: &Booking, user_id: UserId, item_owner_id: UserId) -> bool {
    item_owner_id == user_id
}

/// 予約を閲覧できるか（予約者または所有者）
pub fn may_view(booking: &Booking, user_id: UserId, item_owner_id: UserId) -> bool {
    is_booker(booking, user_id) || is_owner(booking, user_id, item_owner_id)
}

/// 予約を承認・却下できるか（所有者のみ）
pub fn may_approve(booking: &Booking, user_id: UserId, item_owner_id: UserId) -> bool {
    is_owner(booking, user_id, item_owner_id)
}
