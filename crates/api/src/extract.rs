//! Request body extractors.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Typed request body accepted as either JSON or URL-encoded form data.
///
/// `application/json` bodies go through [`Json`]; anything else is treated as
/// a form. Deserialization failures become `400 {"message": ...}` instead of
/// axum's plain-text rejections.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(JsonOrForm(body): JsonOrForm<ItemRequest>) -> impl IntoResponse {
///     format!("price = {}", body.price)
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.trim_start().starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            Ok(Self(value))
        }
    }
}
