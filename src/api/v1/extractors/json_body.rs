/*
 * Responsibility
 * - Json<T> that fails with AppError instead of axum's plain-text rejection
 * - Keeps malformed bodies inside the uniform error shape
 * - Oversized bodies (DefaultBodyLimit) become 413, everything else 400
 */
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            // The body limit surfaces here as a buffering failure.
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::debug!(reason = %rejection.body_text(), "request body over limit");
                Err(AppError::PayloadTooLarge)
            }
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "rejected request body");
                Err(AppError::InvalidBody)
            }
        }
    }
}
