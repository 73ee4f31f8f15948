// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation response types

use serde::{Deserialize, Serialize};

use crate::provider::GeneratedImage;

/// Response from image generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    /// Image payload exactly as returned by the provider
    pub image: String,
    /// How the provider reinterpreted the prompt; serialized as `null` when absent
    pub revised_prompt: Option<String>,
}

impl From<GeneratedImage> for GenerateImageResponse {
    fn from(generated: GeneratedImage) -> Self {
        Self {
            image: generated.image,
            revised_prompt: generated.revised_prompt,
        }
    }
}
