use crate::domain::{BookingStateError, DecideBookingError, RequestBookingError};
use thiserror::Error;

/// 予約管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// ユーザーが存在しない
    #[error("User not found")]
    UserNotFound,

    /// アイテムが存在しない
    #[error("Item not found")]
    ItemNotFound,

    /// 予約が存在しない、または閲覧権限がない
    #[error("Booking not found")]
    BookingNotFound,

    /// 所有者以外による承認・却下
    #[error("Only the item owner can approve or reject a booking")]
    NotItemOwner,

    /// 自分のアイテムの予約
    #[error("Cannot book your own item")]
    OwnItem,

    /// アイテムが貸出不可
    #[error("Item is not available for booking")]
    ItemUnavailable,

    /// 既に承認または却下済み
    #[error("Booking has already been decided")]
    AlreadyDecided,

    /// 状態フィルタが不正
    #[error("{0}")]
    InvalidState(BookingStateError),

    /// BookingStoreのエラー
    #[error("Booking store error")]
    BookingStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// UserDirectoryのエラー
    #[error("User directory error")]
    UserDirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ItemCatalogのエラー
    #[error("Item catalog error")]
    ItemCatalogError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// エラーの種別
///
/// API層はこの種別でHTTPステータスを決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 参照先が存在しない、または関係のない利用者からの参照
    NotFound,
    /// 変更操作の権限がない
    Forbidden,
    /// ドメインルール違反
    InvalidOperation,
    /// ポート層のI/Oエラー
    Infrastructure,
}

impl BookingApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingApplicationError::UserNotFound
            | BookingApplicationError::ItemNotFound
            | BookingApplicationError::BookingNotFound => ErrorKind::NotFound,
            BookingApplicationError::NotItemOwner => ErrorKind::Forbidden,
            BookingApplicationError::OwnItem
            | BookingApplicationError::ItemUnavailable
            | BookingApplicationError::AlreadyDecided
            | BookingApplicationError::InvalidState(_) => ErrorKind::InvalidOperation,
            BookingApplicationError::BookingStoreError(_)
            | BookingApplicationError::UserDirectoryError(_)
            | BookingApplicationError::ItemCatalogError(_) => ErrorKind::Infrastructure,
        }
    }
}

impl From<RequestBookingError> for BookingApplicationError {
    fn from(err: RequestBookingError) -> Self {
        match err {
            RequestBookingError::OwnItem => BookingApplicationError::OwnItem,
            RequestBookingError::ItemUnavailable => BookingApplicationError::ItemUnavailable,
        }
    }
}

impl From<DecideBookingError> for BookingApplicationError {
    fn from(err: DecideBookingError) -> Self {
        match err {
            DecideBookingError::AlreadyDecided => BookingApplicationError::AlreadyDecided,
        }
    }
}

impl From<BookingStateError> for BookingApplicationError {
    fn from(err: BookingStateError) -> Self {
        BookingApplicationError::InvalidState(err)
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
