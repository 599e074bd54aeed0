//! HTTP handlers for the course library resources

pub mod authors;
pub mod courses;
pub mod root;

use crate::core::error::{ApiError, RequestError};
use crate::core::property_checker::type_has_properties;
use crate::core::shape::Shape;
use axum::http::HeaderValue;

/// Response header carrying [`PaginationMetadata`](crate::core::query::PaginationMetadata)
pub const X_PAGINATION: &str = "x-pagination";

/// Methods advertised by `OPTIONS` on collection routes
pub const COLLECTION_METHODS: &str = "GET,OPTIONS,POST";

/// Reject a field selection `T` cannot satisfy
pub(crate) fn ensure_fields<T: Shape>(fields: Option<&str>) -> Result<(), ApiError> {
    if type_has_properties::<T>(fields) {
        Ok(())
    } else {
        Err(RequestError::InvalidFields {
            fields: fields.unwrap_or_default().to_string(),
        }
        .into())
    }
}

pub(crate) fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|e| ApiError::Internal(e.into()))
}
