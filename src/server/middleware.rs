//! Request and response middleware
//!
//! - [`require_acceptable`]: 406 for clients that accept no JSON
//! - [`problem_details`]: stamps `instance` on problem documents and hides
//!   fault details in production
//! - [`handle_panic`]: turns a handler panic into a 500 problem

use crate::config::Environment;
use crate::core::error::ProblemDetails;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;

/// Body of every 500 response in production
pub const FAULT_MESSAGE: &str = "An unexpected fault happened. Try again later.";

fn accepts_json(headers: &HeaderMap) -> bool {
    let mut ranges = headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|range| {
            range
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
        .filter(|range| !range.is_empty())
        .peekable();

    if ranges.peek().is_none() {
        return true;
    }

    ranges.any(|range| {
        matches!(range.as_str(), "*/*" | "application/*" | "application/json")
            || range.ends_with("+json")
    })
}

/// Reject requests whose `Accept` header admits no JSON representation
pub async fn require_acceptable(request: Request, next: Next) -> Response {
    if !accepts_json(request.headers()) {
        tracing::warn!(path = %request.uri().path(), "no acceptable representation");
        return StatusCode::NOT_ACCEPTABLE.into_response();
    }
    next.run(request).await
}

/// Finish problem documents and apply the fault policy
pub async fn problem_details(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    if environment.is_production() && response.status() == StatusCode::INTERNAL_SERVER_ERROR {
        return (StatusCode::INTERNAL_SERVER_ERROR, FAULT_MESSAGE).into_response();
    }

    match response.extensions().get::<ProblemDetails>() {
        Some(problem) if problem.instance.is_none() => problem.clone().with_instance(path).into_response(),
        _ => response,
    }
}

/// Panic handler for `CatchPanicLayer`
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };

    tracing::error!("handler panicked: {detail}");
    ProblemDetails::new(StatusCode::INTERNAL_SERVER_ERROR, "An unexpected fault happened.")
        .with_detail(detail)
        .into_response()
}
