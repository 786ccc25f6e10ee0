use crate::domain::{
    booking::{Booking, NewBooking},
    value_objects::{BookingId, BookingPeriod, BookingStatus, ItemId, UserId},
};
use crate::ports::booking_store::{BookingStore as BookingStoreTrait, ItemBookingWindow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

fn invalid_data(message: String) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        message,
    ))
}

/// PostgreSQLの行データをBookingに変換する
///
/// statusの文字列変換と期間の不変条件（start < end）で
/// エラーハンドリングを行う。
fn map_row_to_booking(row: &PgRow) -> Result<Booking> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(invalid_data)?;

    let start: DateTime<Utc> = row.get("start_date");
    let end: DateTime<Utc> = row.get("end_date");
    let period = BookingPeriod::new(start, end)
        .map_err(|e| invalid_data(format!("invalid booking period: {:?}", e)))?;

    Ok(Booking {
        id: BookingId::new(row.get("id")),
        item_id: ItemId::new(row.get("item_id")),
        booker_id: UserId::new(row.get("booker_id")),
        period,
        status,
    })
}

/// BookingStoreのPostgreSQL実装
///
/// 予約の承認・却下は`UPDATE ... WHERE status = 'WAITING'`の条件付き更新で行い、
/// 影響行数0を「判断済み」として扱う。
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    /// PostgreSQLコネクションプールから新しいBookingStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    /// 予約を保存（IDはBIGSERIALで採番）
    async fn save(&self, booking: NewBooking) -> Result<Booking> {
        let row = sqlx::query(
            r#"
            INSERT INTO bookings (item_id, booker_id, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, item_id, booker_id, start_date, end_date, status
            "#,
        )
        .bind(booking.item_id.value())
        .bind(booking.booker_id.value())
        .bind(booking.period.start())
        .bind(booking.period.end())
        .bind(booking.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_booking(&row)
    }

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(
            r#"
            SELECT id, item_id, booker_id, start_date, end_date, status
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    async fn find_by_booker(&self, booker_id: UserId) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_id, booker_id, start_date, end_date, status
            FROM bookings
            WHERE booker_id = $1
            ORDER BY start_date DESC, id DESC
            "#,
        )
        .bind(booker_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    /// 所有者のアイテムに対する予約（itemsと結合）
    async fn find_by_item_owner(&self, owner_id: UserId) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.item_id, b.booker_id, b.start_date, b.end_date, b.status
            FROM bookings b
            JOIN items i ON i.id = b.item_id
            WHERE i.owner_id = $1
            ORDER BY b.start_date DESC, b.id DESC
            "#,
        )
        .bind(owner_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    /// 条件付き更新
    ///
    /// 同時に2つの更新が走っても、行ロックにより後続は更新後の
    /// statusを見て0行となる。
    async fn decide_if_waiting(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        let row = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2
            WHERE id = $1 AND status = 'WAITING'
            RETURNING id, item_id, booker_id, start_date, end_date, status
            "#,
        )
        .bind(booking_id.value())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    async fn last_and_next_approved(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<ItemBookingWindow> {
        let last = sqlx::query(
            r#"
            SELECT id, item_id, booker_id, start_date, end_date, status
            FROM bookings
            WHERE item_id = $1 AND status = 'APPROVED' AND start_date < $2
            ORDER BY start_date DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(item_id.value())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        let next = sqlx::query(
            r#"
            SELECT id, item_id, booker_id, start_date, end_date, status
            FROM bookings
            WHERE item_id = $1 AND status = 'APPROVED' AND start_date > $2
            ORDER BY start_date ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(item_id.value())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ItemBookingWindow {
            last: last.as_ref().map(map_row_to_booking).transpose()?,
            next: next.as_ref().map(map_row_to_booking).transpose()?,
        })
    }

    async fn has_finished_booking(
        &self,
        user_id: UserId,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let finished: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM bookings
                WHERE booker_id = $1
                  AND item_id = $2
                  AND status = 'APPROVED'
                  AND end_date < $3
            )
            "#,
        )
        .bind(user_id.value())
        .bind(item_id.value())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(finished)
    }
}
