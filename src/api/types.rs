use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    BookingPeriod, BookingStatus, ItemId, UserId, booking::Booking, commands::RequestBooking,
};

/// 操作者のIDを運ぶヘッダー
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// 予約作成のリクエストボディ（POST /bookings）
///
/// 日時はオフセットなしのISO-8601（`2030-01-01T10:00:00`）で、UTCとして解釈する。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub item_id: Option<i64>,
}

impl CreateBookingRequest {
    /// 入力を検証してコマンドに変換する
    ///
    /// 検証ルール：
    /// - start, end, itemIdが指定されていること
    /// - start, endが過去ではないこと
    /// - start < end であること
    pub fn to_command(
        &self,
        booker_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<RequestBooking, String> {
        let start = self
            .start
            .ok_or("Booking start must be specified")?
            .and_utc();
        let end = self.end.ok_or("Booking end must be specified")?.and_utc();
        let item_id = self.item_id.ok_or("Item id must be specified")?;

        if start < now {
            return Err("Booking start cannot be in the past".to_string());
        }
        if end < now {
            return Err("Booking end cannot be in the past".to_string());
        }

        let period = BookingPeriod::new(start, end).map_err(|e| e.to_string())?;

        Ok(RequestBooking {
            booker_id,
            item_id: ItemId::new(item_id),
            period,
        })
    }
}

/// 承認・却下のクエリパラメータ（PATCH /bookings/:id）
#[derive(Debug, Deserialize)]
pub struct ApproveBookingQuery {
    pub approved: bool,
}

/// 予約一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// 状態フィルタ（デフォルト: ALL）
    #[serde(default = "default_state")]
    pub state: String,
}

fn default_state() -> String {
    "ALL".to_string()
}

/// IDのみの参照
///
/// ユーザーとアイテムの詳細は別コンテキストが持つため、予約にはIDだけを載せる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

/// 予約レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
    pub booker: IdRef,
    pub item: IdRef,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.value(),
            start: booking.period.start().naive_utc(),
            end: booking.period.end().naive_utc(),
            status: booking.status,
            booker: IdRef {
                id: booking.booker_id.value(),
            },
            item: IdRef {
                id: booking.item_id.value(),
            },
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
