use crate::application::booking::{
    ServiceDependencies, approve_booking as execute_approve_booking,
    create_booking as execute_create_booking, get_booking as execute_get_booking, list_for_booker,
    list_for_owner,
};
use crate::domain::{commands::DecideBooking, value_objects::BookingId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    extract::SharerUserId,
    types::{ApproveBookingQuery, BookingResponse, CreateBookingRequest, ListBookingsQuery},
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Command handlers (POST / PATCH)
// ============================================================================

/// POST /bookings - 予約を申し込む
///
/// 強制されるビジネスルール:
/// - 期間が妥当であること（入力検証、400）
/// - 予約者・アイテムが存在すること（404）
/// - 自分のアイテムではなく、貸出可能であること（400）
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    SharerUserId(booker_id): SharerUserId,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let cmd = req
        .to_command(booker_id, chrono::Utc::now())
        .map_err(ApiError::BadRequest)?;

    let booking = execute_create_booking(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// PATCH /bookings/:id?approved=bool - 予約を承認または却下
///
/// 強制されるビジネスルール:
/// - 予約が存在すること（404）
/// - 操作者がアイテムの所有者であること（403）
/// - 予約がWAITINGであること（400）
pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    SharerUserId(actor_id): SharerUserId,
    Path(booking_id): Path<i64>,
    Query(query): Query<ApproveBookingQuery>,
) -> Result<Json<BookingResponse>, ApiError> {
    let cmd = DecideBooking {
        actor_id,
        booking_id: BookingId::new(booking_id),
        approved: query.approved,
    };

    let booking = execute_approve_booking(&state.service_deps, cmd).await?;

    Ok(Json(BookingResponse::from(booking)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /bookings/:id - 予約詳細をIDで取得
///
/// 予約者または所有者以外には404を返す。
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    SharerUserId(actor_id): SharerUserId,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking =
        execute_get_booking(&state.service_deps, actor_id, BookingId::new(booking_id)).await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// GET /bookings?state= - 予約者としての一覧
///
/// state: ALL, CURRENT, PAST, FUTURE, WAITING, REJECTED（大文字小文字不問、デフォルトALL）
pub async fn list_booker_bookings(
    State(state): State<Arc<AppState>>,
    SharerUserId(booker_id): SharerUserId,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let bookings = list_for_booker(
        &state.service_deps,
        booker_id,
        Some(query.state.as_str()),
        chrono::Utc::now(),
    )
    .await?;

    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

/// GET /bookings/owner?state= - 所有者としての一覧
pub async fn list_owner_bookings(
    State(state): State<Arc<AppState>>,
    SharerUserId(owner_id): SharerUserId,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let bookings = list_for_owner(
        &state.service_deps,
        owner_id,
        Some(query.state.as_str()),
        chrono::Utc::now(),
    )
    .await?;

    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}
