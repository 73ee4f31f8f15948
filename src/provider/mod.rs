// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upstream image generation provider (OpenAI-compatible Responses API)

pub mod client;
pub mod types;

pub use client::{ImageProvider, ResponsesClient, DEFAULT_TIMEOUT};
pub use types::{
    ContentPart, GeneratedImage, ImageToolSettings, InputMessage, OutputItem, ResponsesRequest,
    ResponsesResponse, Tool, ToolChoice, ALLOWED_QUALITIES, ALLOWED_SIZES,
};
