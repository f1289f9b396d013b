// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tesseract-backed OCR engine
//!
//! Shells out to the system `tesseract` binary through `rusty_tesseract` and
//! keeps the word-level TSV rows (text, bounding box, confidence). The
//! blocking invocation runs on the blocking thread pool so recognition never
//! stalls the async runtime.

use async_trait::async_trait;
use rusty_tesseract::{Args, Image};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

use super::engine::{
    notify, BoundingBox, OcrEngine, OcrError, OcrStage, OcrWord, ProgressFn, RecognitionResult,
};

/// TSV row level for individual words
const WORD_LEVEL: i32 = 5;

/// OCR engine backed by the `tesseract` CLI
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine {
    /// Optional DPI hint forwarded to tesseract
    pub dpi: Option<i32>,
    /// Optional page segmentation mode
    pub psm: Option<i32>,
}

impl TesseractEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn recognize(
        &self,
        image_path: &Path,
        language: &str,
        progress: Option<ProgressFn>,
    ) -> Result<RecognitionResult, OcrError> {
        let started = Instant::now();
        notify(&progress, OcrStage::Recognizing, 0);

        let args = Args {
            lang: language.to_string(),
            dpi: self.dpi,
            psm: self.psm,
            ..Args::default()
        };
        let path = image_path.to_path_buf();

        let output = tokio::task::spawn_blocking(move || {
            let image = Image::from_path(&path).map_err(|e| OcrError::Engine(e.to_string()))?;
            rusty_tesseract::image_to_data(&image, &args)
                .map_err(|e| OcrError::Engine(e.to_string()))
        })
        .await
        .map_err(|e| OcrError::Engine(e.to_string()))??;

        // Word rows only; structural rows (pages, blocks, lines) carry no text.
        let words: Vec<OcrWord> = output
            .data
            .iter()
            .filter(|row| row.level == WORD_LEVEL && !row.text.trim().is_empty())
            .map(|row| OcrWord {
                text: row.text.clone(),
                confidence: (row.conf / 100.0).clamp(0.0, 1.0),
                bounding_box: BoundingBox {
                    x: row.left,
                    y: row.top,
                    width: row.width,
                    height: row.height,
                },
            })
            .collect();

        notify(&progress, OcrStage::Recognizing, 100);
        notify(&progress, OcrStage::Complete, 100);

        let processing_time_ms = started.elapsed().as_millis() as u64;
        debug!(
            "tesseract produced {} words in {}ms",
            words.len(),
            processing_time_ms
        );

        Ok(RecognitionResult {
            words,
            processing_time_ms,
        })
    }
}
