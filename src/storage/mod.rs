// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Transient storage for uploaded images
//!
//! Upload bytes live in a named temp file inside the configured upload
//! directory for exactly the span of one request. The [`StoredUpload`]
//! handle removes the file on drop, on every exit path.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload storage i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Writes uploaded bytes to scoped temp files in one directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory the store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `bytes` to a fresh temp file and hand back the owning handle.
    pub async fn stash(&self, bytes: &[u8]) -> Result<StoredUpload, StorageError> {
        let dir = self.dir.clone();
        let bytes = bytes.to_vec();

        let file = tokio::task::spawn_blocking(move || -> Result<NamedTempFile, StorageError> {
            let mut file = tempfile::Builder::new()
                .prefix("upload-")
                .tempfile_in(&dir)?;
            file.write_all(&bytes)?;
            file.flush()?;
            Ok(file)
        })
        .await
        .map_err(|e| StorageError::Io(io::Error::other(e)))??;

        debug!("stashed upload at {}", file.path().display());
        Ok(StoredUpload { file })
    }
}

/// An uploaded image persisted for the current request.
///
/// Dropping the handle deletes the underlying file.
#[derive(Debug)]
pub struct StoredUpload {
    file: NamedTempFile,
}

impl StoredUpload {
    /// Path of the stored image, valid while the handle is alive.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
