//! Typed error handling for the course library API
//!
//! Every handler returns [`ApiError`], which carries enough information to
//! pick the status code and to render an RFC 7807 problem document.
//!
//! # Error Categories
//!
//! - [`RequestError`]: the request itself could not be interpreted (400)
//! - [`ValidationProblem`]: a well-formed payload broke field rules (422)
//! - [`ApiError::NotFound`]: the addressed resource does not exist (404)
//! - [`ApiError::Conflict`]: the write clashes with existing state (409)
//! - [`ConfigError`]: the service was wired incorrectly (500)
//! - [`ApiError::Internal`]: anything else that went wrong (500)
//!
//! # Example
//!
//! ```rust,ignore
//! async fn get_author(id: Uuid) -> Result<Author, ApiError> {
//!     repository.get_author(id).await?.ok_or(ApiError::NotFound)
//! }
//! ```

use crate::core::property_mapping::MappingError;
use crate::core::validation::ValidationProblem;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content type of problem detail bodies
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Problem type URI of validation failures
pub const VALIDATION_PROBLEM_TYPE: &str = "https://courselibrary.com/modelvalidationproblem";

/// The main error type of the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unusable query string, path or body
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Payload parsed but broke one or more field rules
    #[error(transparent)]
    Validation(#[from] ValidationProblem),

    /// Addressed resource does not exist
    #[error("resource not found")]
    NotFound,

    /// Write clashes with a resource owned elsewhere
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// The service was wired incorrectly
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unexpected failure (repository, serialization, ...)
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Request(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Config(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Request(e) => e.error_code(),
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Conflict { .. } => "CONFLICT",
            ApiError::Config(e) => e.error_code(),
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Problem document for this error; `None` for a bare 404
    pub fn to_problem(&self) -> Option<ProblemDetails> {
        match self {
            ApiError::Request(e) => Some(
                ProblemDetails::new(StatusCode::BAD_REQUEST, "One or more errors on input occurred.")
                    .with_detail(e.to_string()),
            ),
            ApiError::Validation(problem) => Some(
                ProblemDetails::new(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "One or more validation errors occurred.",
                )
                .with_type(VALIDATION_PROBLEM_TYPE)
                .with_detail("See the errors field for details.")
                .with_errors(problem.errors().clone()),
            ),
            ApiError::NotFound => None,
            ApiError::Conflict { message } => Some(
                ProblemDetails::new(StatusCode::CONFLICT, "The request conflicts with existing data.")
                    .with_detail(message.clone()),
            ),
            ApiError::Config(_) | ApiError::Internal(_) => Some(
                ProblemDetails::new(StatusCode::INTERNAL_SERVER_ERROR, "An unexpected fault happened.")
                    .with_detail(self.to_string()),
            ),
        }
    }
}

impl From<MappingError> for ApiError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::InvalidOrderBy { clause, .. } => {
                ApiError::Request(RequestError::InvalidOrderBy { order_by: clause })
            }
            other => ApiError::Config(ConfigError::Mapping(other)),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Config(e) => tracing::error!(code = e.error_code(), "configuration defect: {e}"),
            ApiError::Internal(e) => tracing::error!("unexpected fault: {e:#}"),
            ApiError::Request(e) => tracing::warn!(code = e.error_code(), "rejected request: {e}"),
            ApiError::Validation(problem) => {
                tracing::warn!(fields = problem.errors().len(), "payload failed validation")
            }
            ApiError::Conflict { message } => tracing::warn!("rejected write: {message}"),
            ApiError::NotFound => {}
        }

        match self.to_problem() {
            Some(problem) => problem.into_response(),
            None => self.status_code().into_response(),
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// The request could not be interpreted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// `orderBy` names a field the output shape cannot be sorted by
    #[error("the orderBy clause '{order_by}' cannot be applied")]
    InvalidOrderBy { order_by: String },

    /// `fields` names something the output shape does not have
    #[error("the fields '{fields}' are not available on this resource")]
    InvalidFields { fields: String },

    /// Query string, path segment or body could not be parsed
    #[error("{message}")]
    Malformed { message: String },
}

impl RequestError {
    pub fn malformed(message: impl Into<String>) -> Self {
        RequestError::Malformed {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidOrderBy { .. } => "INVALID_ORDER_BY",
            RequestError::InvalidFields { .. } => "INVALID_FIELDS",
            RequestError::Malformed { .. } => "MALFORMED_REQUEST",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Wiring defects: a missing mapping or route is never the client's fault
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Mapping(MappingError),

    #[error("no route named '{name}' is registered")]
    RouteNotFound { name: String },

    #[error("route '{route}' requires parameter '{parameter}'")]
    MissingRouteParameter { route: String, parameter: String },

    #[error("failed to build link for route '{route}': {message}")]
    LinkGeneration { route: String, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Mapping(MappingError::NotFound { .. }) => "MAPPING_NOT_FOUND",
            ConfigError::Mapping(_) => "INVALID_MAPPING",
            ConfigError::RouteNotFound { .. } => "ROUTE_NOT_FOUND",
            ConfigError::MissingRouteParameter { .. } => "MISSING_ROUTE_PARAMETER",
            ConfigError::LinkGeneration { .. } => "LINK_GENERATION_FAILED",
        }
    }
}

// =============================================================================
// Problem Details
// =============================================================================

/// RFC 7807 problem document
///
/// The rendered response also carries a copy of the document in its
/// extensions, so the problem-details middleware can fill in `instance` and
/// enforce the production fault policy without re-parsing the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub problem_type: Option<String>,

    pub title: String,

    pub status: u16,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instance: Option<String>,

    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub errors: IndexMap<String, Vec<String>>,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            problem_type: None,
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            errors: IndexMap::new(),
        }
    }

    pub fn with_type(mut self, problem_type: impl Into<String>) -> Self {
        self.problem_type = Some(problem_type.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_errors(mut self, errors: IndexMap<String, Vec<String>>) -> Self {
        self.errors = errors;
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let body = match serde_json::to_vec(&self) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("failed to serialize problem details: {e}");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        let mut response = (
            self.status_code(),
            [(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_PROBLEM_JSON))],
            body,
        )
            .into_response();
        response.extensions_mut().insert(self);
        response
    }
}
