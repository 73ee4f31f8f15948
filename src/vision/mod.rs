// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Reference image handling for the generation relay
//!
//! This module provides:
//! - Parsing and validation of `data:<mime>;base64,<data>` uploads
//! - Normalization of uploads to the provider's required encoding

pub mod image_utils;
pub mod transcode;

pub use image_utils::{
    decode_base64_payload, detect_format, format_from_mime, same_encoding, DataUrl, ImageError,
    MAX_IMAGE_SIZE,
};
pub use transcode::{ensure_encoding, ImageCrateTranscoder, ImageTranscoder, TARGET_MIME_TYPE};
