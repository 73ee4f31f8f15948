// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for GET /health

use super::support::*;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use imagegen_relay::api::HealthResponse;
use tower::ServiceExt;

async fn get_health(app: Router) -> (StatusCode, HealthResponse) {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_without_provider() {
    let (status, health) = get_health(app_without_provider()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health.status, "ok");
    assert!(!health.provider_configured);
    assert!(health.issues.is_some());
}

#[tokio::test]
async fn test_health_with_provider() {
    let app = app_with(
        FakeProvider::replying(image_output("aW1n", None)),
        CountingTranscoder::returning(b"png"),
    );
    let (status, health) = get_health(app).await;
    assert_eq!(status, StatusCode::OK);
    assert!(health.provider_configured);
    assert!(health.issues.is_none());
    assert_eq!(health.version, imagegen_relay::version::VERSION);
}
