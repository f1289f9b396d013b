// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload response types

use serde::{Deserialize, Serialize};

use crate::ocr::OcrWord;

/// One recognized word on the wire
///
/// Deliberately text-only: the engine's bounding box and confidence stay on
/// [`OcrWord`]; widening this type is the single place to change if a caller
/// ever needs layout data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WordToken {
    pub text: String,
}

/// Response from a successful upload-and-recognize request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Recognized words, in engine order
    pub words_with_positions: Vec<WordToken>,
}

impl UploadResponse {
    /// Project engine words down to the wire shape, preserving order.
    pub fn from_words(words: &[OcrWord]) -> Self {
        Self {
            words_with_positions: words
                .iter()
                .map(|word| WordToken {
                    text: word.text.clone(),
                })
                .collect(),
        }
    }
}
