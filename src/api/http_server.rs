// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use super::generate_image::generate_image_handler;
use super::handlers::health_handler;
use crate::config::{RelayConfig, DEFAULT_MAX_BODY_BYTES};
use crate::provider::{ImageProvider, ImageToolSettings, ResponsesClient};
use crate::vision::{ImageCrateTranscoder, ImageTranscoder};

/// Read-only state shared by every request
#[derive(Clone)]
pub struct AppState {
    /// `None` when no credential was configured at startup
    pub provider: Option<Arc<dyn ImageProvider>>,
    pub transcoder: Arc<dyn ImageTranscoder>,
    pub tool_settings: ImageToolSettings,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(
        provider: Option<Arc<dyn ImageProvider>>,
        transcoder: Arc<dyn ImageTranscoder>,
        tool_settings: ImageToolSettings,
    ) -> Self {
        Self {
            provider,
            transcoder,
            tool_settings,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Build state from process configuration. The provider client is only
    /// constructed when a credential is present.
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let provider: Option<Arc<dyn ImageProvider>> = match config.api_key() {
            Some(api_key) => Some(Arc::new(ResponsesClient::new(
                &config.openai_base_url,
                api_key,
                &config.image_model,
                config.request_timeout(),
            )?)),
            None => {
                warn!("OPENAI_API_KEY is not set; image generation requests will fail until it is configured");
                None
            }
        };

        let mut state = Self::new(
            provider,
            Arc::new(ImageCrateTranscoder),
            config.tool_settings(),
        );
        state.max_body_bytes = config.max_body_bytes;
        Ok(state)
    }

    /// State with no provider and the real transcoder
    pub fn new_for_test() -> Self {
        Self::new(
            None,
            Arc::new(ImageCrateTranscoder),
            ImageToolSettings::default(),
        )
    }

    pub fn with_provider(mut self, provider: Arc<dyn ImageProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_transcoder(mut self, transcoder: Arc<dyn ImageTranscoder>) -> Self {
        self.transcoder = transcoder;
        self
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    let body_limit = state.max_body_bytes;
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/generate-image", post(generate_image_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until ctrl-c
pub async fn start_server(config: RelayConfig) -> Result<()> {
    config.validate()?;
    let addr = config.socket_addr()?;
    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Image relay listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received, draining connections");
        })
        .await?;

    Ok(())
}
