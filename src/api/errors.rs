// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire shape of every error response: `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// The two user-visible error kinds of the upload API.
///
/// Every underlying fault past the point where upload bytes are in hand
/// (storage, engine, timeout) collapses into `RecognitionFailed`; the
/// specific cause is logged for operators and never surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No file field was present in the request
    MissingFile,
    /// Recognition could not produce a result, for any reason
    RecognitionFailed,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFile => StatusCode::BAD_REQUEST,
            ApiError::RecognitionFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::MissingFile => "No file uploaded",
            ApiError::RecognitionFailed => "Failed to parse image text",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
