// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Uploader client for the upload-and-recognize API
//!
//! Reproduces the browser uploader's contract: select a file, preview it
//! locally while the upload is in flight, decode the server payload once at
//! the network boundary, and render the word list as space-joined text.
//!
//! Components:
//! - `uploader` - HTTP client, local preview, payload decoding
//! - `state` - Per-upload state machine (Idle/Uploading/Success/Failed)

pub mod state;
pub mod uploader;

pub use state::{UploadPhase, UploaderState};
pub use uploader::{decode_payload, ClientError, Preview, UploadClient, UploadOutcome};
