// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration, read from environment variables at startup.

use std::{env, path::PathBuf, time::Duration};

/// Default listening port
pub const DEFAULT_PORT: u16 = 5001;

/// Default directory for transient upload files
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Default tesseract language code
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Default recognition timeout in seconds
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 60;

/// Default multipart body cap (10MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listening port (`PORT`)
    pub port: u16,
    /// Directory holding scoped upload temp files (`UPLOAD_DIR`)
    pub upload_dir: PathBuf,
    /// Language code passed to the OCR engine (`OCR_LANGUAGE`)
    pub ocr_language: String,
    /// Hard cap on a single recognition run (`OCR_TIMEOUT_SECS`)
    pub ocr_timeout: Duration,
    /// Maximum accepted upload body size (`MAX_UPLOAD_BYTES`)
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            ocr_timeout: Duration::from_secs(DEFAULT_OCR_TIMEOUT_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR));

        let ocr_language =
            env::var("OCR_LANGUAGE").unwrap_or_else(|_| DEFAULT_OCR_LANGUAGE.to_string());

        let ocr_timeout_secs = env::var("OCR_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_OCR_TIMEOUT_SECS);

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            port,
            upload_dir,
            ocr_language,
            ocr_timeout: Duration::from_secs(ocr_timeout_secs),
            max_upload_bytes,
        }
    }
}
