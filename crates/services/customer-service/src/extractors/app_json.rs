//! JSON extractor with error bodies in the service's format.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use common::AppError;

/// JSON extractor that renders rejections as `AppError::BadRequest`.
///
/// The body is parsed in two steps so that type errors (a missing customer
/// type, say) come out without serde_json's line and column suffix.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let value = serde_json::from_value(value).map_err(|e| AppError::bad_request(e.to_string()))?;

        Ok(AppJson(value))
    }
}
