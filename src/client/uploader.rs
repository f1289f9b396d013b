// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload client, local preview and payload decoding

use reqwest::multipart;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode preview image: {0}")]
    Image(#[from] image::ImageError),

    #[error("upload request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Locally decoded image metadata, shown while the upload is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub size_bytes: usize,
}

impl Preview {
    /// Read and decode the image at `path` without touching the network.
    pub async fn read(path: &Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let image = image::load_from_memory(&bytes)?;
        Ok(Self {
            width: image.width(),
            height: image.height(),
            size_bytes: bytes.len(),
        })
    }
}

/// Outcome of one upload, decoded exactly once at the network boundary.
///
/// Downstream code matches on this instead of re-checking payload shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The server returned a word list
    Recognized(Vec<String>),
    /// The payload carried no usable word list (server error or malformed)
    Rejected(String),
}

impl UploadOutcome {
    /// Text to display: words joined with single spaces, or empty when the
    /// upload was rejected.
    pub fn display_text(&self) -> String {
        match self {
            UploadOutcome::Recognized(words) => words.join(" "),
            UploadOutcome::Rejected(_) => String::new(),
        }
    }
}

/// Decode a server payload into an [`UploadOutcome`].
///
/// Anything without a `wordsWithPositions` array is rejected; the server's
/// error message (if any) is kept for logging but never displayed.
pub fn decode_payload(payload: &Value) -> UploadOutcome {
    match payload.get("wordsWithPositions").and_then(Value::as_array) {
        Some(entries) => UploadOutcome::Recognized(
            entries
                .iter()
                .filter_map(|entry| entry.get("text").and_then(Value::as_str))
                .map(str::to_owned)
                .collect(),
        ),
        None => {
            debug!("Expected a word array but got: {}", payload);
            let reason = payload
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("malformed response")
                .to_string();
            UploadOutcome::Rejected(reason)
        }
    }
}

/// HTTP client for the upload endpoint.
#[derive(Debug, Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    endpoint: String,
}

impl UploadClient {
    /// Client for a server at `base_url` (e.g. `http://localhost:5001`).
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/api/upload", base_url.as_ref().trim_end_matches('/')),
        }
    }

    /// POST the file at `path` as multipart field `image` and decode the
    /// response.
    pub async fn upload(&self, path: &Path) -> Result<UploadOutcome, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let part = multipart::Part::bytes(bytes).file_name(file_name);
        let form = multipart::Form::new().part("image", part);

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let payload: Value = response.json().await?;
        Ok(decode_payload(&payload))
    }

    /// Preview the file locally and upload it, concurrently.
    ///
    /// The two results are independent; they update disjoint pieces of
    /// uploader state and no ordering between them is guaranteed.
    pub async fn upload_with_preview(
        &self,
        path: &Path,
    ) -> (
        Result<Preview, ClientError>,
        Result<UploadOutcome, ClientError>,
    ) {
        tokio::join!(Preview::read(path), self.upload(path))
    }
}
