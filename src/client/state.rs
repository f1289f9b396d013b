// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-upload state machine
//!
//! `Idle -> Uploading -> {Success, Failed}`. Success and Failed are terminal
//! for that file; selecting a new file restarts from Idle via [`UploaderState::begin`],
//! and [`UploaderState::clear`] forces Idle regardless of the current phase.
//! Clearing does not cancel an in-flight request.

use tracing::debug;

use super::uploader::{ClientError, Preview, UploadOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
    Success,
    Failed,
}

/// Uploader UI state: current phase, local preview, displayed text.
#[derive(Debug, Clone, Default)]
pub struct UploaderState {
    phase: UploadPhase,
    preview: Option<Preview>,
    display_text: String,
}

impl UploaderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// A new file was selected: restart the machine and mark the upload
    /// in flight.
    pub fn begin(&mut self) {
        self.phase = UploadPhase::Uploading;
        self.preview = None;
        self.display_text.clear();
    }

    /// Attach the local preview once it is ready; independent of the
    /// network call.
    pub fn attach_preview(&mut self, preview: Option<Preview>) {
        self.preview = preview;
    }

    /// Record the upload outcome. Any failure, whether a rejected payload
    /// or a transport error, degrades to an empty display text.
    pub fn finish(&mut self, outcome: &Result<UploadOutcome, ClientError>) {
        match outcome {
            Ok(outcome @ UploadOutcome::Recognized(_)) => {
                self.display_text = outcome.display_text();
                self.phase = UploadPhase::Success;
            }
            Ok(UploadOutcome::Rejected(reason)) => {
                debug!("Upload rejected: {}", reason);
                self.display_text.clear();
                self.phase = UploadPhase::Failed;
            }
            Err(e) => {
                debug!("Upload failed: {}", e);
                self.display_text.clear();
                self.phase = UploadPhase::Failed;
            }
        }
    }

    /// Reset preview and text and force Idle, regardless of current phase.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
