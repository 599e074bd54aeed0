//! Axum extractors that turn unusable input into problem responses
//!
//! Stock `Json`, `Query` and `Path` rejections are plain-text; these wrappers
//! map them onto [`ApiError`] so every failure leaves as problem details.

use super::Validatable;
use crate::core::error::{ApiError, RequestError};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// JSON body that parsed and passed [`Validatable::check`]
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_author(
///     ValidatedJson(payload): ValidatedJson<AuthorForCreation>,
/// ) -> Result<Response, ApiError> {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validatable + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| RequestError::malformed(rejection.body_text()))?;

        payload.check()?;
        Ok(ValidatedJson(payload))
    }
}

/// Query string deserialized into `T`
pub struct ResourceQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ResourceQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| RequestError::malformed(rejection.body_text()))?;
        Ok(ResourceQuery(query))
    }
}

/// Path parameters deserialized into `T` (e.g. `Uuid` or `(Uuid, Uuid)`)
pub struct ResourcePath<T>(pub T);

impl<S, T> FromRequestParts<S> for ResourcePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(path) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| RequestError::malformed(rejection.body_text()))?;
        Ok(ResourcePath(path))
    }
}
