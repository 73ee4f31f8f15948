// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wire types for the OpenAI-compatible Responses API with the image generation tool

use serde::{Deserialize, Serialize};

/// Output sizes the image generation tool accepts
pub const ALLOWED_SIZES: &[&str] = &["1024x1024", "1024x1536", "1536x1024", "auto"];

/// Quality tiers the image generation tool accepts
pub const ALLOWED_QUALITIES: &[&str] = &["low", "medium", "high", "auto"];

pub const DEFAULT_SIZE: &str = "1024x1024";
pub const DEFAULT_QUALITY: &str = "high";
pub const TRANSPARENT_BACKGROUND: &str = "transparent";

/// Fixed parameters declared on every image generation tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageToolSettings {
    pub size: String,
    pub quality: String,
    pub background: String,
}

impl Default for ImageToolSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE.to_string(),
            quality: DEFAULT_QUALITY.to_string(),
            background: TRANSPARENT_BACKGROUND.to_string(),
        }
    }
}

impl ImageToolSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !ALLOWED_SIZES.contains(&self.size.as_str()) {
            return Err(format!(
                "invalid size '{}'; allowed: {}",
                self.size,
                ALLOWED_SIZES.join(", ")
            ));
        }
        if !ALLOWED_QUALITIES.contains(&self.quality.as_str()) {
            return Err(format!(
                "invalid quality '{}'; allowed: {}",
                self.quality,
                ALLOWED_QUALITIES.join(", ")
            ));
        }
        Ok(())
    }
}

// --- Request types ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
    pub tools: Vec<Tool>,
    pub tool_choice: ToolChoice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

/// A single part of a multi-part input message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    InputText { text: String },
    /// File part carrying a `data:<mime>;base64,...` URL
    InputImage { image_url: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Tool {
    ImageGeneration {
        size: String,
        quality: String,
        background: String,
    },
}

/// Forces the provider to call a specific tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolChoice {
    ImageGeneration,
}

impl ResponsesRequest {
    /// Build a single-turn image generation request.
    ///
    /// The message always starts with the prompt as a text part; a reference
    /// image, when given, follows as one file part.
    pub fn image_generation(
        model: &str,
        prompt: &str,
        reference_image_url: Option<String>,
        settings: &ImageToolSettings,
    ) -> Self {
        let mut content = vec![ContentPart::InputText {
            text: prompt.to_string(),
        }];
        if let Some(image_url) = reference_image_url {
            content.push(ContentPart::InputImage { image_url });
        }

        Self {
            model: model.to_string(),
            input: vec![InputMessage {
                role: "user".to_string(),
                content,
            }],
            tools: vec![Tool::ImageGeneration {
                size: settings.size.clone(),
                quality: settings.quality.clone(),
                background: settings.background.clone(),
            }],
            tool_choice: ToolChoice::ImageGeneration,
        }
    }
}

// --- Response types ---

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

/// Kinds of items a Responses API call can emit
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
    ImageGenerationCall {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        result: Option<String>,
        #[serde(default)]
        revised_prompt: Option<String>,
    },
    Message {
        #[serde(default)]
        content: Vec<serde_json::Value>,
    },
    Reasoning {
        #[serde(default)]
        summary: Vec<serde_json::Value>,
    },
    #[serde(other)]
    Unknown,
}

/// Image payload pulled out of a provider response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub image: String,
    pub revised_prompt: Option<String>,
}

impl ResponsesResponse {
    /// First image generation call carrying a result, if any
    pub fn first_generated_image(self) -> Option<GeneratedImage> {
        self.output.into_iter().find_map(|item| match item {
            OutputItem::ImageGenerationCall {
                result: Some(image),
                revised_prompt,
                ..
            } if !image.is_empty() => Some(GeneratedImage {
                image,
                revised_prompt,
            }),
            OutputItem::ImageGenerationCall { .. }
            | OutputItem::Message { .. }
            | OutputItem::Reasoning { .. }
            | OutputItem::Unknown => None,
        })
    }
}
