use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingStateError, BookingStatus, booking::Booking};

/// 一覧取得時の状態フィルタ
///
/// CURRENT/PAST/FUTUREは期間のみで判定し、ステータスは見ない。
/// WAITING/REJECTEDはステータスのみで判定し、期間は見ない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingState::All => "ALL",
            BookingState::Current => "CURRENT",
            BookingState::Past => "PAST",
            BookingState::Future => "FUTURE",
            BookingState::Waiting => "WAITING",
            BookingState::Rejected => "REJECTED",
        }
    }

    /// 任意指定のパラメータからパースする
    ///
    /// # エラー
    /// - 未指定: `BookingStateError::Missing`
    /// - 未知の値: `BookingStateError::Unknown`
    pub fn from_param(value: Option<&str>) -> Result<Self, BookingStateError> {
        value.ok_or(BookingStateError::Missing)?.parse()
    }
}

impl std::str::FromStr for BookingState {
    type Err = BookingStateError;

    /// 大文字小文字を区別しない
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            _ => Err(BookingStateError::Unknown(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 純粋関数：予約の時間区分を判定する
///
/// 時間軸上の区分（PAST / CURRENT / FUTURE）のいずれか1つを返す。
/// 期間は両端を含むため、3区分は重ならない。
pub fn classify(booking: &Booking, now: DateTime<Utc>) -> BookingState {
    if booking.period.end() < now {
        BookingState::Past
    } else if booking.period.start() > now {
        BookingState::Future
    } else {
        BookingState::Current
    }
}

/// 純粋関数：予約が状態フィルタに一致するか
pub fn matches(booking: &Booking, now: DateTime<Utc>, state: BookingState) -> bool {
    match state {
        BookingState::All => true,
        BookingState::Current => booking.period.contains(now),
        BookingState::Past => booking.period.end() < now,
        BookingState::Future => booking.period.start() > now,
        BookingState::Waiting => booking.status == BookingStatus::Waiting,
        BookingState::Rejected => booking.status == BookingStatus::Rejected,
    }
}

/// 状態フィルタを適用し、開始日時の降順に並べる
///
/// 開始日時が同じ場合はIDの降順。
pub fn filter_and_sort(
    bookings: Vec<Booking>,
    now: DateTime<Utc>,
    state: BookingState,
) -> Vec<Booking> {
    let mut filtered: Vec<Booking> = bookings
        .into_iter()
        .filter(|booking| matches(booking, now, state))
        .collect();

    filtered.sort_by(|a, b| {
        b.period
            .start()
            .cmp(&a.period.start())
            .then_with(|| b.id.cmp(&a.id))
    });

    filtered
}
