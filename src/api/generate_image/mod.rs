// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation API endpoint module
//!
//! Provides POST /api/generate-image for prompt (+ reference image) generation.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{generate_image_handler, normalize_reference_image};
pub use request::{GenerateImageBody, GenerateImageRequest};
pub use response::GenerateImageResponse;
