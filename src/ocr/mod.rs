// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR capability for text extraction from images
//!
//! The recognition work is delegated entirely to an external engine behind
//! the [`OcrEngine`] trait. The production implementation drives the system
//! `tesseract` binary; tests substitute their own engines through the same
//! trait.
//!
//! Components:
//! - `engine` - The engine trait, word/result types and progress channel
//! - `tesseract` - Tesseract-backed implementation

pub mod engine;
pub mod tesseract;

pub use engine::{
    BoundingBox, OcrEngine, OcrError, OcrProgress, OcrStage, OcrWord, ProgressFn,
    RecognitionResult,
};
pub use tesseract::TesseractEngine;
