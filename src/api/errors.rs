// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MISSING_CREDENTIAL_MESSAGE: &str = "OPENAI_API_KEY is not configured.";
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body.";
pub const MISSING_PROMPT_MESSAGE: &str = "Prompt is required.";
pub const INVALID_DATA_URL_MESSAGE: &str = "Invalid base64 data URL.";
pub const NOT_AN_IMAGE_MESSAGE: &str = "Uploaded file must be an image.";
pub const NO_IMAGE_OUTPUT_MESSAGE: &str = "No image was returned by the image model.";
pub const GENERATION_FAILED_MESSAGE: &str = "Image generation failed. Please try again.";

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Server is missing required configuration
    Configuration(String),
    /// Caller must fix the request and resubmit
    InvalidRequest(String),
    /// Provider answered without the expected output
    BadGateway(String),
    /// Anything else. The cause is logged but never sent to the caller.
    Internal { cause: String },
}

impl ApiError {
    pub fn missing_credential() -> Self {
        ApiError::Configuration(MISSING_CREDENTIAL_MESSAGE.to_string())
    }

    pub fn internal(cause: impl fmt::Display) -> Self {
        ApiError::Internal {
            cause: cause.to_string(),
        }
    }

    /// Message exposed to the caller
    pub fn public_message(&self) -> &str {
        match self {
            ApiError::Configuration(msg)
            | ApiError::InvalidRequest(msg)
            | ApiError::BadGateway(msg) => msg,
            ApiError::Internal { .. } => GENERATION_FAILED_MESSAGE,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.public_message().to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Configuration(_) => 500,
            ApiError::InvalidRequest(_) => 400,
            ApiError::BadGateway(_) => 502,
            ApiError::Internal { .. } => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
            ApiError::Internal { cause } => write!(f, "Internal error: {}", cause),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}
