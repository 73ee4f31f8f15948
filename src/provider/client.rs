// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client for an OpenAI-compatible Responses API used for image generation

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::types::{ResponsesRequest, ResponsesResponse};

/// Default request timeout for provider calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// An upstream service able to run an image generation request
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Model that requests are addressed to
    fn model_name(&self) -> &str;

    /// Send a Responses API request and return the parsed response
    async fn create_response(&self, request: &ResponsesRequest) -> Result<ResponsesResponse>;
}

/// Calls `POST {endpoint}/v1/responses` with a bearer credential
pub struct ResponsesClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model_name: String,
}

impl ResponsesClient {
    /// Create a new ResponsesClient
    pub fn new(endpoint: &str, api_key: &str, model_name: &str, timeout: Duration) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("provider API key must not be empty"));
        }

        let client = Client::builder().timeout(timeout).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Image provider configured: endpoint={}, model={}, timeout={}s",
            endpoint,
            model_name,
            timeout.as_secs()
        );

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            model_name: model_name.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ImageProvider for ResponsesClient {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn create_response(&self, request: &ResponsesRequest) -> Result<ResponsesResponse> {
        let url = format!("{}/v1/responses", self.endpoint);
        debug!("Image provider POST {} (model={})", url, request.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "image provider returned {}: {}",
                status,
                text
            ));
        }

        let api_response: ResponsesResponse = response.json().await?;
        debug!(
            "Image provider response {:?} with {} output items",
            api_response.id,
            api_response.output.len()
        );
        Ok(api_response)
    }
}
