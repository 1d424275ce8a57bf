//! JSON body extractor with API-shaped rejections.
//!
//! Field validation is the service layer's job; this extractor only turns
//! malformed JSON into the same error body every other failure uses.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use fintrack_core::{FieldError, FintrackError};
use serde::de::DeserializeOwned;

/// JSON extractor whose rejection is an [`AppError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T> std::ops::Deref for JsonBody<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> AppError {
    AppError(FintrackError::Validation(vec![FieldError::new(
        "body",
        "invalid_json",
        rejection.body_text(),
    )]))
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| rejection_to_error(&rejection))?;

        Ok(JsonBody(value))
    }
}
