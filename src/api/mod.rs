// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod http_server;
pub mod upload;

pub use errors::{ApiError, ErrorBody};
pub use http_server::{create_app, start_server, AppState};
pub use upload::{upload_handler, UploadResponse, WordToken};
