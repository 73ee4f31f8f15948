// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Data URL parsing and image format helpers for reference uploads

use std::sync::OnceLock;

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD},
        DecodePaddingMode,
    },
    Engine as _,
};
use image::ImageFormat;
use regex::Regex;
use thiserror::Error;

/// Maximum decoded reference image size (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Standard alphabet decoder that accepts padded and unpadded input
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Unsupported MIME type: {0}")]
    UnsupportedMimeType(String),

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,
}

/// A `data:<mime>;base64,<data>` URL split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Declared MIME type, lowercased
    pub mime_type: String,
    /// Base64 payload exactly as supplied
    pub base64_data: String,
}

fn data_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^data:([^;,]+);base64,(.+)$").expect("data URL pattern is valid")
    })
}

impl DataUrl {
    /// Parse a base64 data URL. Returns `None` when the text does not match
    /// `data:<mime>;base64,<data>`.
    pub fn parse(input: &str) -> Option<Self> {
        let captures = data_url_pattern().captures(input.trim())?;
        let mime_type = captures.get(1)?.as_str().trim().to_ascii_lowercase();
        let base64_data = captures.get(2)?.as_str().to_string();
        if mime_type.is_empty() {
            return None;
        }
        Some(Self {
            mime_type,
            base64_data,
        })
    }

    /// Build a data URL from a MIME type and raw bytes
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_ascii_lowercase(),
            base64_data: STANDARD.encode(bytes),
        }
    }

    /// Whether the declared MIME type is an image type
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Decode the payload into raw bytes, enforcing `MAX_IMAGE_SIZE`
    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        decode_base64_payload(&self.base64_data)
    }
}

impl std::fmt::Display for DataUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

/// Decode a base64 payload into raw image bytes. Padding is optional and
/// non-zero trailing bits are ignored.
pub fn decode_base64_payload(base64_str: &str) -> Result<Vec<u8>, ImageError> {
    if base64_str.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let bytes = LENIENT.decode(base64_str.trim())?;

    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    if bytes.len() > MAX_IMAGE_SIZE {
        return Err(ImageError::TooLarge(bytes.len(), MAX_IMAGE_SIZE));
    }

    Ok(bytes)
}

/// Detect image format from magic bytes
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.len() < 4 {
        return None;
    }

    match bytes {
        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Some(ImageFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),

        // WebP: RIFF .... WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => {
            Some(ImageFormat::WebP)
        }

        // GIF: GIF87a or GIF89a
        [0x47, 0x49, 0x46, 0x38, x, ..] if *x == 0x37 || *x == 0x39 => Some(ImageFormat::Gif),

        // BMP: BM
        [0x42, 0x4D, ..] => Some(ImageFormat::Bmp),

        // TIFF: II (little-endian) or MM (big-endian)
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => Some(ImageFormat::Tiff),

        _ => None,
    }
}

/// Map a MIME type onto an encodable image format
pub fn format_from_mime(mime_type: &str) -> Result<ImageFormat, ImageError> {
    let mime = mime_type.trim().to_ascii_lowercase();
    match mime.as_str() {
        "image/jpg" | "image/pjpeg" => Ok(ImageFormat::Jpeg),
        other => ImageFormat::from_mime_type(other)
            .ok_or_else(|| ImageError::UnsupportedMimeType(mime_type.to_string())),
    }
}

/// Whether two MIME types name the same encoding
pub fn same_encoding(a: &str, b: &str) -> bool {
    let a = a.trim();
    let b = b.trim();
    if a.eq_ignore_ascii_case(b) {
        return true;
    }
    match (format_from_mime(a), format_from_mime(b)) {
        (Ok(fa), Ok(fb)) => fa == fb,
        _ => false,
    }
}
