//! Request context extractor.

use crate::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use fintrack_core::RequestContext;
use std::convert::Infallible;
use uuid::Uuid;

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request context bounded by the configured request timeout.
///
/// The id comes from `X-Request-Id` when present, otherwise a fresh UUID.
#[derive(Debug, Clone)]
pub struct Ctx(pub RequestContext);

#[async_trait]
impl FromRequestParts<AppState> for Ctx {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map_or_else(|| Uuid::new_v4().to_string(), ToString::to_string);

        Ok(Ctx(
            RequestContext::new(request_id).with_timeout(state.request_timeout),
        ))
    }
}
