// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Route tests for the fetch API
//!
//! Requests go through the router with `oneshot`; pages come from the local
//! test site.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use pagefetch::api::errors::ErrorResponse;
use pagefetch::api::http_server::{create_app, AppState, HealthResponse};
use pagefetch::api::tools::ToolsResponse;
use pagefetch::{BatchFetchResponse, FetchResponse, FetchService};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use crate::common::{refused_url, spawn_site, test_config};

fn app() -> Router {
    let service = FetchService::new(test_config()).unwrap();
    create_app(AppState::new(service))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthResponse = read_json(response).await;
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_tools_lists_both_operations() {
    let request = Request::builder()
        .uri("/v1/tools")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let tools: ToolsResponse = read_json(response).await;
    let names: Vec<_> = tools.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["fetch", "fetch_multiple"]);
    assert!(tools.tools[1].description.contains("max 5"));
}

#[tokio::test]
async fn test_fetch_returns_window() {
    let base = spawn_site().await;

    let response = app()
        .oneshot(post_json(
            "/v1/fetch",
            json!({"url": format!("{base}/text"), "max_length": 6, "start_index": 5}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: FetchResponse = read_json(response).await;
    assert_eq!(body.content, "is a l");
    assert_eq!(body.status_code, 200);
}

#[tokio::test]
async fn test_fetch_accepts_camel_case_fields() {
    let base = spawn_site().await;

    let response = app()
        .oneshot(post_json(
            "/v1/fetch",
            json!({"url": format!("{base}/text"), "maxLength": 4, "startIndex": 10}),
        ))
        .await
        .unwrap();

    let body: FetchResponse = read_json(response).await;
    assert_eq!(body.content, "long");
}

#[tokio::test]
async fn test_fetch_without_url_is_bad_request() {
    let response = app()
        .oneshot(post_json("/v1/fetch", json!({"url": "  "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error_type, "invalid_request");
    assert_eq!(error.message, "URL is required");
}

#[tokio::test]
async fn test_fetch_unreachable_is_bad_gateway() {
    let url = refused_url().await;

    let response = app()
        .oneshot(post_json("/v1/fetch", json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error_type, "fetch_failed");
    assert!(error.message.starts_with("failed to fetch URL: "));
}

#[tokio::test]
async fn test_fetch_timeout_is_gateway_timeout() {
    let base = spawn_site().await;

    let response = app()
        .oneshot(post_json("/v1/fetch", json!({"url": format!("{base}/slow")})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_fetch_route_rejects_get() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/fetch")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_fetch_multiple_requires_urls() {
    let response = app()
        .oneshot(post_json("/v1/fetch_multiple", json!({"urls": []})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.message, "at least one URL is required");
}

#[tokio::test]
async fn test_fetch_multiple_rejects_too_many() {
    let urls: Vec<String> = (0..6).map(|i| format!("http://example.com/{i}")).collect();

    let response = app()
        .oneshot(post_json("/v1/fetch_multiple", json!({ "urls": urls })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.message, "too many URLs: maximum allowed is 5");
}

#[tokio::test]
async fn test_fetch_multiple_reports_per_url_errors() {
    let base = spawn_site().await;
    let ok = format!("{base}/sized/40");
    let dead = refused_url().await;

    let response = app()
        .oneshot(post_json(
            "/v1/fetch_multiple",
            json!({"urls": [&ok, &dead], "max_length": 20}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let batch: BatchFetchResponse = read_json(response).await;
    assert_eq!(batch.responses[&ok].content.len(), 20);
    assert!(batch.errors.contains_key(&dead));
}
