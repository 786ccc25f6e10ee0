use crate::domain::UserId;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::{error::ApiError, types::SHARER_USER_ID_HEADER};

/// `X-Sharer-User-Id`ヘッダーから取り出した操作者のID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerUserId(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(SHARER_USER_ID_HEADER) else {
            return Err(header_error("Missing"));
        };

        let id = value
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .ok_or_else(|| header_error("Invalid"))?;

        Ok(SharerUserId(UserId::new(id)))
    }
}

fn header_error(problem: &str) -> ApiError {
    ApiError::BadRequest(format!("{} {} header", problem, SHARER_USER_ID_HEADER))
}
