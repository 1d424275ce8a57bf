//! Owner extractor.
//!
//! Authentication is terminated upstream; the gateway forwards the
//! authenticated user's id in `X-User-Id`.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use fintrack_core::{FieldError, FintrackError, UserId};

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user on whose behalf the request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| UserId::parse(value).ok())
            .filter(|id| id.is_valid())
            .map(Owner)
            .ok_or_else(|| {
                AppError(FintrackError::Validation(vec![FieldError::new(
                    USER_ID_HEADER,
                    "invalid_owner",
                    "X-User-Id header must carry a positive user id",
                )]))
            })
    }
}
