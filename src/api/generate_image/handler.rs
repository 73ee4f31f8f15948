// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation endpoint handler

use std::sync::Arc;
use std::time::Instant;

use axum::{body::Bytes, extract::State, Json};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::request::GenerateImageRequest;
use super::response::GenerateImageResponse;
use crate::api::errors::{ApiError, INVALID_DATA_URL_MESSAGE, NO_IMAGE_OUTPUT_MESSAGE};
use crate::api::http_server::AppState;
use crate::provider::ResponsesRequest;
use crate::vision::{
    ensure_encoding, same_encoding, DataUrl, ImageError, ImageTranscoder, TARGET_MIME_TYPE,
};

/// POST /api/generate-image - Generate an image from a prompt and optional reference image
///
/// Pipeline:
/// 1. Provider configured? (500 if the credential is missing)
/// 2. Parse and validate the body (400 on any client error)
/// 3. Normalize the reference image to PNG
/// 4. Call the provider, forcing the image generation tool
/// 5. Return the first image generation result (502 if there is none)
pub async fn generate_image_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    // 1. Credential check comes before anything is read from the body
    let provider = state.provider.clone().ok_or_else(|| {
        error!(%request_id, "Image generation requested but no provider credential is configured");
        ApiError::missing_credential()
    })?;

    // 2. Validate request
    let request = GenerateImageRequest::from_body(&body).map_err(|e| {
        warn!(%request_id, "Image generation request rejected: {}", e);
        e
    })?;

    debug!(
        %request_id,
        prompt_len = request.prompt.len(),
        reference_mime = ?request.reference_image.as_ref().map(|r| r.mime_type.as_str()),
        "Image generation request received"
    );

    let start = Instant::now();

    // 3. Reference image
    let reference_image_url = match request.reference_image {
        Some(data_url) => Some(
            normalize_reference_image(state.transcoder.clone(), data_url)
                .await
                .map_err(|e| log_failure(request_id, e))?,
        ),
        None => None,
    };

    // 4. Provider call
    let provider_request = ResponsesRequest::image_generation(
        provider.model_name(),
        &request.prompt,
        reference_image_url,
        &state.tool_settings,
    );

    let response = provider
        .create_response(&provider_request)
        .await
        .map_err(|e| log_failure(request_id, ApiError::internal(format!("{:#}", e))))?;

    // 5. Extract the image
    let generated = response.first_generated_image().ok_or_else(|| {
        warn!(%request_id, "Image provider returned no image generation output");
        ApiError::BadGateway(NO_IMAGE_OUTPUT_MESSAGE.to_string())
    })?;

    info!(
        %request_id,
        model = provider.model_name(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        revised = generated.revised_prompt.is_some(),
        "Image generated"
    );

    Ok(Json(generated.into()))
}

/// Decode a reference upload and return it as a PNG data URL.
///
/// Already-PNG uploads are forwarded with the caller's base64 text
/// untouched; anything else is transcoded once on the blocking pool. Every
/// payload is decoded first so the size cap applies to both paths.
pub async fn normalize_reference_image(
    transcoder: Arc<dyn ImageTranscoder>,
    data_url: DataUrl,
) -> Result<String, ApiError> {
    let bytes = data_url.decode().map_err(|e| match e {
        ImageError::TooLarge(_, _) => ApiError::InvalidRequest(e.to_string()),
        _ => ApiError::InvalidRequest(INVALID_DATA_URL_MESSAGE.to_string()),
    })?;

    if same_encoding(&data_url.mime_type, TARGET_MIME_TYPE) {
        return Ok(DataUrl {
            mime_type: TARGET_MIME_TYPE.to_string(),
            base64_data: data_url.base64_data,
        }
        .to_string());
    }

    let current_mime = data_url.mime_type;
    let png = tokio::task::spawn_blocking(move || {
        ensure_encoding(transcoder.as_ref(), bytes, &current_mime, TARGET_MIME_TYPE)
    })
    .await
    .map_err(|e| ApiError::internal(format!("transcoding task failed: {}", e)))?
    .map_err(|e| ApiError::internal(format!("transcoding failed: {}", e)))?;

    Ok(DataUrl::from_bytes(TARGET_MIME_TYPE, &png).to_string())
}

fn log_failure(request_id: Uuid, err: ApiError) -> ApiError {
    match &err {
        ApiError::Internal { cause } => error!(%request_id, "Image generation failed: {}", cause),
        other => warn!(%request_id, "Image generation request rejected: {}", other),
    }
    err
}
