// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fakes and request helpers for the API tests

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use image::ImageFormat;
use imagegen_relay::{
    api::{create_app, AppState},
    provider::{ImageProvider, ResponsesRequest, ResponsesResponse},
    vision::{ImageError, ImageTranscoder},
};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // for `oneshot`

pub enum Reply {
    Json(Value),
    Fail(String),
}

/// Provider that records every request and answers with a canned reply
pub struct FakeProvider {
    reply: Reply,
    pub requests: Mutex<Vec<ResponsesRequest>>,
}

impl FakeProvider {
    pub fn replying(body: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Json(body),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> ResponsesRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("provider was never called")
    }
}

#[async_trait]
impl ImageProvider for FakeProvider {
    fn model_name(&self) -> &str {
        "fake-model"
    }

    async fn create_response(&self, request: &ResponsesRequest) -> Result<ResponsesResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Json(body) => Ok(serde_json::from_value(body.clone())?),
            Reply::Fail(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}

/// Transcoder that counts calls and returns fixed bytes, or fails every call
pub struct CountingTranscoder {
    output: Option<Vec<u8>>,
    pub calls: AtomicUsize,
}

impl CountingTranscoder {
    pub fn returning(output: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            output: Some(output.to_vec()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            output: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageTranscoder for CountingTranscoder {
    fn transcode(&self, _bytes: &[u8], target: ImageFormat) -> Result<Vec<u8>, ImageError> {
        assert_eq!(target, ImageFormat::Png);
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.output
            .clone()
            .ok_or_else(|| ImageError::DecodeFailed("corrupt reference image".to_string()))
    }
}

pub fn image_output(result: &str, revised_prompt: Option<&str>) -> Value {
    serde_json::json!({
        "id": "resp_test",
        "output": [
            {"type": "reasoning", "id": "rs_1", "summary": []},
            {
                "type": "image_generation_call",
                "id": "ig_1",
                "status": "completed",
                "result": result,
                "revised_prompt": revised_prompt
            }
        ]
    })
}

pub fn app_with(provider: Arc<FakeProvider>, transcoder: Arc<CountingTranscoder>) -> Router {
    let state = AppState::new_for_test()
        .with_provider(provider)
        .with_transcoder(transcoder);
    create_app(Arc::new(state))
}

pub fn app_without_provider() -> Router {
    create_app(Arc::new(AppState::new_for_test()))
}

pub async fn post_raw(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/generate-image")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    post_raw(app, &body.to_string()).await
}
