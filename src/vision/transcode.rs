// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Re-encoding of reference images into the provider's required encoding

use std::io::Cursor;

use image::ImageFormat;
use tracing::debug;

use super::image_utils::{detect_format, format_from_mime, same_encoding, ImageError};

/// MIME type the image provider accepts for reference images
pub const TARGET_MIME_TYPE: &str = "image/png";

/// Decodes arbitrary image bytes and re-encodes them in a target format.
#[cfg_attr(test, mockall::automock)]
pub trait ImageTranscoder: Send + Sync {
    fn transcode(&self, bytes: &[u8], target: ImageFormat) -> Result<Vec<u8>, ImageError>;
}

/// `ImageTranscoder` backed by the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateTranscoder;

impl ImageTranscoder for ImageCrateTranscoder {
    fn transcode(&self, bytes: &[u8], target: ImageFormat) -> Result<Vec<u8>, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::EmptyData);
        }

        let decoded = match detect_format(bytes) {
            Some(format) => image::load_from_memory_with_format(bytes, format),
            None => image::load_from_memory(bytes),
        }
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

        let mut out = Cursor::new(Vec::new());
        decoded
            .write_to(&mut out, target)
            .map_err(|e| ImageError::EncodeFailed(e.to_string()))?;

        debug!(
            "Transcoded {}x{} image to {:?}: {} -> {} bytes",
            decoded.width(),
            decoded.height(),
            target,
            bytes.len(),
            out.get_ref().len()
        );

        Ok(out.into_inner())
    }
}

/// Return `bytes` in the `target_mime` encoding.
///
/// When `current_mime` already names the target encoding the bytes are
/// returned untouched and the transcoder is not called, so already-PNG
/// uploads are never recompressed.
pub fn ensure_encoding(
    transcoder: &dyn ImageTranscoder,
    bytes: Vec<u8>,
    current_mime: &str,
    target_mime: &str,
) -> Result<Vec<u8>, ImageError> {
    if same_encoding(current_mime, target_mime) {
        return Ok(bytes);
    }
    let target = format_from_mime(target_mime)?;
    transcoder.transcode(&bytes, target)
}
