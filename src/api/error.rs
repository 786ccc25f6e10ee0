use crate::application::booking::{BookingApplicationError, ErrorKind};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと入力検証エラーをまとめ、
/// HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    /// アプリケーション層のエラー
    Application(BookingApplicationError),
    /// 入力検証エラー（ヘッダー・ボディの形式など）
    BadRequest(String),
}

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError::Application(err)
    }
}

fn error_code(err: &BookingApplicationError) -> &'static str {
    match err {
        BookingApplicationError::UserNotFound => "USER_NOT_FOUND",
        BookingApplicationError::ItemNotFound => "ITEM_NOT_FOUND",
        BookingApplicationError::BookingNotFound => "BOOKING_NOT_FOUND",
        BookingApplicationError::NotItemOwner => "NOT_ITEM_OWNER",
        BookingApplicationError::OwnItem => "OWN_ITEM",
        BookingApplicationError::ItemUnavailable => "ITEM_UNAVAILABLE",
        BookingApplicationError::AlreadyDecided => "ALREADY_DECIDED",
        BookingApplicationError::InvalidState(_) => "INVALID_STATE",
        BookingApplicationError::BookingStoreError(_) => "BOOKING_STORE_ERROR",
        BookingApplicationError::UserDirectoryError(_) => "USER_DIRECTORY_ERROR",
        BookingApplicationError::ItemCatalogError(_) => "ITEM_CATALOG_ERROR",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::debug!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            ApiError::Application(err) => match err.kind() {
                // 404 Not Found - 存在しない、または関係のない利用者
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, error_code(&err), err.to_string()),

                // 403 Forbidden - 所有者以外による承認・却下
                ErrorKind::Forbidden => (StatusCode::FORBIDDEN, error_code(&err), err.to_string()),

                // 400 Bad Request - ドメインルール違反
                ErrorKind::InvalidOperation => {
                    (StatusCode::BAD_REQUEST, error_code(&err), err.to_string())
                }

                // 500 Internal Server Error - システム障害
                // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
                ErrorKind::Infrastructure => {
                    tracing::error!(
                        "{}: {}",
                        err,
                        std::error::Error::source(&err)
                            .map(|e| e.to_string())
                            .unwrap_or_default()
                    );
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        error_code(&err),
                        "An unexpected error occurred".to_string(),
                    )
                }
            },
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookingStateError;

    #[test]
    fn test_status_mapping() {
        use BookingApplicationError::*;

        let cases = [
            (UserNotFound, StatusCode::NOT_FOUND),
            (BookingNotFound, StatusCode::NOT_FOUND),
            (NotItemOwner, StatusCode::FORBIDDEN),
            (OwnItem, StatusCode::BAD_REQUEST),
            (AlreadyDecided, StatusCode::BAD_REQUEST),
            (
                InvalidState(BookingStateError::Missing),
                StatusCode::BAD_REQUEST,
            ),
            (
                BookingStoreError("db down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_bad_request() {
        let response = ApiError::BadRequest("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
