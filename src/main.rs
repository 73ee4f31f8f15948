// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use imagegen_relay::{start_server, version, RelayConfig};
use std::env;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if !dotenv_loaded {
        warn!("No .env file found, using process environment only");
    }

    let config = RelayConfig::parse();
    info!("{}", version::get_version_info());
    info!("Configuration: {:?}", config);

    if let Err(e) = start_server(config).await {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
