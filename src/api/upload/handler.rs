// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use bytes::Bytes;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::response::UploadResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::ocr::{OcrProgress, OcrStage, ProgressFn};

/// POST /api/upload - Extract text from an uploaded image
///
/// Accepts `multipart/form-data` with a single file field `image` and
/// returns the recognized words in engine order.
///
/// # Response
/// - 200: `{"wordsWithPositions":[{"text":"..."}, ...]}`
/// - 400: `{"error":"No file uploaded"}` when no file field is present
/// - 500: `{"error":"Failed to parse image text"}` for any recognition,
///   storage or timeout fault; the cause is logged, never surfaced
///
/// The uploaded bytes live in a scoped temp file that is removed on every
/// exit path. Engine progress notifications are logged as percentages and
/// not streamed to the client.
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    // 1. Pull the file field out of the multipart body
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(e) => {
            warn!("Not a multipart request: {}", e);
            return Err(ApiError::MissingFile);
        }
    };

    let mut upload: Option<(Bytes, Option<String>)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("image") {
                    continue;
                }
                let content_type = field.content_type().map(str::to_owned);
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some((bytes, content_type));
                        break;
                    }
                    Err(e) => {
                        warn!("Failed to read upload field: {}", e);
                        break;
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Malformed multipart body: {}", e);
                break;
            }
        }
    }

    let Some((bytes, content_type)) = upload else {
        warn!("Upload request without a file field");
        return Err(ApiError::MissingFile);
    };

    let format = image::guess_format(&bytes).ok();
    debug!(
        "Received upload: {} bytes, content type {:?}, detected format {:?}",
        bytes.len(),
        content_type,
        format
    );

    // 2. Persist to a scoped temp file
    let stored = state.store.stash(&bytes).await.map_err(|e| {
        warn!("Failed to persist upload: {}", e);
        ApiError::RecognitionFailed
    })?;

    // 3. Run OCR with progress logging and an explicit timeout
    let progress: ProgressFn = Arc::new(|p: OcrProgress| {
        if p.stage == OcrStage::Recognizing {
            info!("Progress: {}%", p.percent);
        }
    });

    let recognition = state
        .engine
        .recognize(stored.path(), &state.config.ocr_language, Some(progress));

    let result = match timeout(state.config.ocr_timeout, recognition).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            warn!("Error during OCR processing: {}", e);
            return Err(ApiError::RecognitionFailed);
        }
        Err(_) => {
            warn!(
                "OCR timed out after {:?} for a {} byte upload",
                state.config.ocr_timeout,
                bytes.len()
            );
            return Err(ApiError::RecognitionFailed);
        }
    };

    info!(
        "OCR complete: {} words, {}ms",
        result.words.len(),
        result.processing_time_ms
    );

    // 4. Project engine words to the wire shape
    Ok(Json(UploadResponse::from_words(&result.words)))
}
