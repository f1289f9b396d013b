// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod client;
pub mod config;
pub mod ocr;
pub mod storage;
pub mod version;

// Re-export main types
pub use api::{create_app, start_server, ApiError, AppState, ErrorBody, UploadResponse, WordToken};
pub use client::{
    decode_payload, ClientError, Preview, UploadClient, UploadOutcome, UploadPhase, UploaderState,
};
pub use config::ServerConfig;
pub use ocr::{
    BoundingBox, OcrEngine, OcrError, OcrProgress, OcrStage, OcrWord, ProgressFn,
    RecognitionResult, TesseractEngine,
};
pub use storage::{StorageError, StoredUpload, UploadStore};
