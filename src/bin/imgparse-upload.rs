// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Command-line uploader built on the client library.
//!
//! Usage: imgparse-upload <image-path> [server-url]
//!
//! Previews the image locally while the upload is in flight, then prints
//! the recognized text.

use anyhow::{bail, Result};
use imgparse_node::client::{UploadClient, UploaderState};
use std::{env, path::PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        bail!("usage: imgparse-upload <image-path> [server-url]");
    };
    let server = args
        .next()
        .or_else(|| env::var("SERVER_URL").ok())
        .unwrap_or_else(|| "http://localhost:5001".to_string());

    let client = UploadClient::new(&server);
    let mut state = UploaderState::new();
    state.begin();

    let (preview, outcome) = client.upload_with_preview(&path).await;

    match &preview {
        Ok(p) => println!(
            "{} ({}x{}, {} bytes)",
            path.display(),
            p.width,
            p.height,
            p.size_bytes
        ),
        Err(e) => eprintln!("preview unavailable: {}", e),
    }
    state.attach_preview(preview.ok());
    state.finish(&outcome);

    println!("{}", state.display_text());
    Ok(())
}
