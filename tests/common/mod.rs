//! Shared helpers for the HTTP-level tests

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use axum_test::TestServer;
use course_library::prelude::*;
use serde_json::Value;
use tower::ServiceExt;

pub const BASE_URL: &str = "http://localhost:5000";

pub const BERRY_ID: &str = "d28888e9-2ba9-473a-a40f-e38cb54f9b35";
pub const NANCY_ID: &str = "da2fd609-d754-4feb-8acd-c4f9ff13ba96";
pub const ARNOLD_ID: &str = "102b566b-ba1f-404c-b2df-e2cde39ade09";
pub const COMMANDEERING_ID: &str = "5b1c2b4d-48c7-402a-80c3-cc796ad49c6b";

/// Router over freshly seeded sample data
pub async fn seeded_app_with(config: AppConfig) -> Router {
    let repository = InMemoryRepository::new();
    seed_repository(&repository)
        .await
        .expect("seeding should succeed");

    ServerBuilder::new()
        .with_config(config)
        .with_repository(repository)
        .build()
        .expect("Failed to build app")
}

pub async fn seeded_app() -> Router {
    seeded_app_with(AppConfig::default()).await
}

pub async fn test_server() -> TestServer {
    TestServer::new(seeded_app().await)
}

/// Raw response parts of a single request
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("body should be JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn pagination(&self) -> Value {
        let raw = self.header("x-pagination").expect("X-Pagination header");
        serde_json::from_str(raw).expect("X-Pagination should be JSON")
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.expect("request should complete");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable")
        .to_vec();
    Reply { status, headers, body }
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// Path part of an absolute link produced by the API
pub fn path_of(href: &str) -> &str {
    href.strip_prefix(BASE_URL).unwrap_or(href)
}

/// `href` of the link with relation `rel` in a `links` array
pub fn link<'a>(links: &'a Value, rel: &str) -> Option<&'a str> {
    links
        .as_array()?
        .iter()
        .find(|l| l["rel"] == rel)
        .and_then(|l| l["href"].as_str())
}
