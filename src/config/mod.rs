// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process configuration, parsed once at startup

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::provider::ImageToolSettings;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen address '{0}': {1}")]
    ListenAddr(String, std::net::AddrParseError),

    #[error("invalid provider base URL '{0}': {1}")]
    BaseUrl(String, url::ParseError),

    #[error("provider base URL must use http or https, got '{0}'")]
    BaseUrlScheme(String),

    #[error("invalid image tool settings: {0}")]
    ToolSettings(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Image generation relay server
#[derive(Parser, Clone)]
#[command(name = "imagegen-relay")]
#[command(version)]
#[command(about = "HTTP relay for prompt + reference image generation requests", long_about = None)]
pub struct RelayConfig {
    /// Address the HTTP server binds to
    #[arg(long, env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Provider credential; requests fail with a configuration error while unset
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible provider
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub openai_base_url: String,

    /// Model that orchestrates the image generation tool
    #[arg(long, env = "IMAGE_MODEL", default_value = DEFAULT_MODEL)]
    pub image_model: String,

    /// Declared output size (1024x1024, 1024x1536, 1536x1024, auto)
    #[arg(long, env = "IMAGE_SIZE", default_value = crate::provider::types::DEFAULT_SIZE)]
    pub image_size: String,

    /// Declared quality tier (low, medium, high, auto)
    #[arg(long, env = "IMAGE_QUALITY", default_value = crate::provider::types::DEFAULT_QUALITY)]
    pub image_quality: String,

    /// Timeout applied to each provider call, in seconds
    #[arg(long, env = "PROVIDER_TIMEOUT_SECS", default_value_t = 120)]
    pub request_timeout_secs: u64,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

// Keeps the credential out of logs
impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("listen_addr", &self.listen_addr)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("image_model", &self.image_model)
            .field("image_size", &self.image_size)
            .field("image_quality", &self.image_quality)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            openai_api_key: None,
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            image_model: DEFAULT_MODEL.to_string(),
            image_size: crate::provider::types::DEFAULT_SIZE.to_string(),
            image_quality: crate::provider::types::DEFAULT_QUALITY.to_string(),
            request_timeout_secs: 120,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl RelayConfig {
    /// The credential, if set to a non-blank value
    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn tool_settings(&self) -> ImageToolSettings {
        ImageToolSettings {
            size: self.image_size.clone(),
            quality: self.image_quality.clone(),
            ..ImageToolSettings::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen_addr
            .parse()
            .map_err(|e| ConfigError::ListenAddr(self.listen_addr.clone(), e))
    }

    /// Check everything that can be checked before serving. A missing
    /// credential is not an error here; it is reported per request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;

        let base = url::Url::parse(&self.openai_base_url)
            .map_err(|e| ConfigError::BaseUrl(self.openai_base_url.clone(), e))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ConfigError::BaseUrlScheme(self.openai_base_url.clone()));
        }

        self.tool_settings()
            .validate()
            .map_err(ConfigError::ToolSettings)?;

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Zero("request timeout"));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Zero("max body bytes"));
        }
        Ok(())
    }
}
