// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Engine trait and result types for OCR processing

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by an OCR engine
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine failure: {0}")]
    Engine(String),
}

/// Pixel-space location of a recognized word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// A single recognized word
///
/// Carries everything the engine reports. The upload endpoint projects this
/// down to the word text; callers that need layout information read the
/// bounding box and confidence from here.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrWord {
    /// Literal word string as reported by the engine
    pub text: String,
    /// Confidence score (0.0-1.0)
    pub confidence: f32,
    /// Word location within the image
    pub bounding_box: BoundingBox,
}

/// Result of one recognition run
///
/// Words appear in the order the engine produced them (left-to-right,
/// top-to-bottom per its layout analysis); nothing here re-sorts them.
#[derive(Debug, Clone, Default)]
pub struct RecognitionResult {
    pub words: Vec<OcrWord>,
    pub processing_time_ms: u64,
}

/// Recognition phase reported through the progress channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrStage {
    Recognizing,
    Complete,
}

/// A progress notification emitted during recognition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OcrProgress {
    pub stage: OcrStage,
    pub percent: u8,
}

/// Callback invoked with progress notifications; callers decide whether to
/// log, forward, or ignore them.
pub type ProgressFn = Arc<dyn Fn(OcrProgress) + Send + Sync>;

/// An OCR engine that extracts words from an image file.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize text in the image at `image_path`.
    ///
    /// `language` is an engine language code (e.g. "eng"). When `progress`
    /// is supplied the engine emits [`OcrProgress`] notifications as
    /// recognition advances.
    async fn recognize(
        &self,
        image_path: &Path,
        language: &str,
        progress: Option<ProgressFn>,
    ) -> Result<RecognitionResult, OcrError>;
}

pub(crate) fn notify(progress: &Option<ProgressFn>, stage: OcrStage, percent: u8) {
    if let Some(callback) = progress {
        callback(OcrProgress { stage, percent });
    }
}
