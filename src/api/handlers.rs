// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::http_server::AppState;
use crate::version;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether a provider credential was supplied at startup
    pub provider_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<String>>,
}

/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let provider_configured = state.provider.is_some();
    let issues = if provider_configured {
        None
    } else {
        Some(vec!["OPENAI_API_KEY is not configured".to_string()])
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION.to_string(),
        provider_configured,
        issues,
    })
}
