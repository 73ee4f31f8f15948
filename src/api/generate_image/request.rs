// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation request parsing and validation

use serde::Deserialize;
use serde_json::Value;

use crate::api::errors::{
    ApiError, INVALID_DATA_URL_MESSAGE, INVALID_JSON_MESSAGE, MISSING_PROMPT_MESSAGE,
    NOT_AN_IMAGE_MESSAGE,
};
use crate::vision::DataUrl;

/// Raw body for POST /api/generate-image
///
/// Fields are kept as loose JSON so that wrong types surface as the same
/// client errors as missing values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageBody {
    /// Text prompt describing the desired image
    #[serde(default)]
    pub prompt: Option<Value>,

    /// Optional `data:<mime>;base64,<data>` reference image
    #[serde(default)]
    pub image_data_url: Option<Value>,
}

impl GenerateImageBody {
    /// Validate the body. Checks run in order and stop at the first
    /// failure: prompt, data URL shape, then data URL MIME type.
    pub fn validate(self) -> Result<GenerateImageRequest, ApiError> {
        let prompt = match self.prompt {
            Some(Value::String(prompt)) if !prompt.trim().is_empty() => prompt,
            _ => return Err(ApiError::InvalidRequest(MISSING_PROMPT_MESSAGE.to_string())),
        };

        let reference_image = match self.image_data_url {
            None | Some(Value::Null) => None,
            Some(Value::String(url)) => Some(parse_reference_image(&url)?),
            Some(_) => {
                return Err(ApiError::InvalidRequest(
                    INVALID_DATA_URL_MESSAGE.to_string(),
                ))
            }
        };

        Ok(GenerateImageRequest {
            prompt,
            reference_image,
        })
    }
}

/// Validated request for POST /api/generate-image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateImageRequest {
    /// Text prompt describing the desired image
    pub prompt: String,
    /// Optional reference image, already checked to be an `image/*` data URL
    pub reference_image: Option<DataUrl>,
}

impl GenerateImageRequest {
    /// Parse and validate a raw JSON body. Anything other than a JSON
    /// object is malformed.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let invalid_json = || ApiError::InvalidRequest(INVALID_JSON_MESSAGE.to_string());

        let value: Value = serde_json::from_slice(body).map_err(|_| invalid_json())?;
        if !value.is_object() {
            return Err(invalid_json());
        }
        let body: GenerateImageBody = serde_json::from_value(value).map_err(|_| invalid_json())?;
        body.validate()
    }
}

fn parse_reference_image(url: &str) -> Result<DataUrl, ApiError> {
    let data_url = DataUrl::parse(url)
        .ok_or_else(|| ApiError::InvalidRequest(INVALID_DATA_URL_MESSAGE.to_string()))?;
    if !data_url.is_image() {
        return Err(ApiError::InvalidRequest(NOT_AN_IMAGE_MESSAGE.to_string()));
    }
    Ok(data_url)
}
