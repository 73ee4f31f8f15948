// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod provider;
pub mod version;
pub mod vision;

pub use api::{create_app, start_server, ApiError, AppState};
pub use config::RelayConfig;
pub use provider::{ImageProvider, ResponsesClient};
pub use vision::{ensure_encoding, ImageCrateTranscoder, ImageTranscoder};
