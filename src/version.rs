// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the image relay

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2026-10-16";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "prompt-to-image",
    "reference-image",
    "png-normalization",
    "transparent-background",
];

/// Get full version information
pub fn get_version_info() -> String {
    format!(
        "imagegen-relay v{} ({}) features: {}",
        VERSION,
        BUILD_DATE,
        FEATURES.join(", ")
    )
}
