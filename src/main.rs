// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use imgparse_node::{
    api::{start_server, AppState},
    config::ServerConfig,
    ocr::TesseractEngine,
    storage::UploadStore,
    version,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("Starting {}", version::get_version_string());

    let config = ServerConfig::from_env();
    tracing::info!(
        "Config: port={}, upload_dir={}, language={}, timeout={:?}",
        config.port,
        config.upload_dir.display(),
        config.ocr_language,
        config.ocr_timeout
    );

    let store = UploadStore::new(&config.upload_dir)?;
    let engine = Arc::new(TesseractEngine::new());
    let state = AppState::new(config, engine, store);

    start_server(state).await
}
