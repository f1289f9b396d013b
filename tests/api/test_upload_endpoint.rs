// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Upload endpoint tests for POST /api/upload
//!
//! These tests drive the real router with hand-built multipart bodies and a
//! stub OCR engine injected through `AppState`, verifying:
//! - The success contract (word list in engine order)
//! - The exact 400/500 error bodies
//! - Scoped temp-file cleanup on every exit path
//! - The recognition timeout policy

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use imgparse_node::api::http_server::{create_app, AppState};
use imgparse_node::config::ServerConfig;
use imgparse_node::ocr::{
    BoundingBox, OcrEngine, OcrError, OcrStage, OcrWord, ProgressFn, RecognitionResult,
};
use imgparse_node::storage::UploadStore;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt; // for `oneshot`

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Stub engine returning a fixed word list; records the path and language it
/// was invoked with.
struct FixedEngine {
    words: Vec<&'static str>,
    seen_path: Mutex<Option<PathBuf>>,
    seen_language: Mutex<Option<String>>,
}

impl FixedEngine {
    fn new(words: Vec<&'static str>) -> Self {
        Self {
            words,
            seen_path: Mutex::new(None),
            seen_language: Mutex::new(None),
        }
    }
}

#[async_trait]
impl OcrEngine for FixedEngine {
    async fn recognize(
        &self,
        image_path: &Path,
        language: &str,
        progress: Option<ProgressFn>,
    ) -> Result<RecognitionResult, OcrError> {
        assert!(image_path.exists(), "upload file should exist during OCR");
        *self.seen_path.lock().unwrap() = Some(image_path.to_path_buf());
        *self.seen_language.lock().unwrap() = Some(language.to_string());

        if let Some(progress) = progress {
            progress(imgparse_node::ocr::OcrProgress {
                stage: OcrStage::Recognizing,
                percent: 50,
            });
        }

        Ok(RecognitionResult {
            words: self
                .words
                .iter()
                .enumerate()
                .map(|(i, text)| OcrWord {
                    text: text.to_string(),
                    confidence: 0.9,
                    bounding_box: BoundingBox {
                        x: i as i32 * 50,
                        y: 0,
                        width: 40,
                        height: 12,
                    },
                })
                .collect(),
            processing_time_ms: 3,
        })
    }
}

/// Stub engine that fails every invocation, recording the upload path.
struct FailingEngine {
    seen_path: Mutex<Option<PathBuf>>,
}

#[async_trait]
impl OcrEngine for FailingEngine {
    async fn recognize(
        &self,
        image_path: &Path,
        _language: &str,
        _progress: Option<ProgressFn>,
    ) -> Result<RecognitionResult, OcrError> {
        *self.seen_path.lock().unwrap() = Some(image_path.to_path_buf());
        Err(OcrError::Engine("corrupt image data".to_string()))
    }
}

/// Stub engine that never finishes within the test timeout.
struct SlowEngine;

#[async_trait]
impl OcrEngine for SlowEngine {
    async fn recognize(
        &self,
        _image_path: &Path,
        _language: &str,
        _progress: Option<ProgressFn>,
    ) -> Result<RecognitionResult, OcrError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(RecognitionResult::default())
    }
}

fn test_state(engine: Arc<dyn OcrEngine>, upload_dir: &Path, ocr_timeout: Duration) -> AppState {
    let config = ServerConfig {
        ocr_timeout,
        ..ServerConfig::default()
    };
    let store = UploadStore::new(upload_dir).expect("Failed to create upload store");
    AppState::new(config, engine, store)
}

fn multipart_request(field_name: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field_name}\"; filename=\"scan.png\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn dir_entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn test_upload_returns_words_in_engine_order() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(
        Arc::new(FixedEngine::new(vec!["Hello", "World"])),
        dir.path(),
        Duration::from_secs(60),
    );
    let app = create_app(state);

    let response = app
        .oneshot(multipart_request("image", b"not a real png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await;
    assert_eq!(
        payload,
        json!({
            "wordsWithPositions": [{"text": "Hello"}, {"text": "World"}]
        })
    );
}

#[tokio::test]
async fn test_engine_receives_configured_language() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(FixedEngine::new(vec!["ok"]));
    let state = test_state(engine.clone(), dir.path(), Duration::from_secs(60));
    let app = create_app(state);

    let response = app
        .oneshot(multipart_request("image", b"bytes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        engine.seen_language.lock().unwrap().as_deref(),
        Some("eng")
    );
}

#[tokio::test]
async fn test_missing_file_field_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(
        Arc::new(FixedEngine::new(vec!["unused"])),
        dir.path(),
        Duration::from_secs(60),
    );
    let app = create_app(state);

    // A multipart body whose only field is not named "image"
    let response = app
        .oneshot(multipart_request("file", b"bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "No file uploaded"})
    );
}

#[tokio::test]
async fn test_non_multipart_request_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(
        Arc::new(FixedEngine::new(vec!["unused"])),
        dir.path(),
        Duration::from_secs(60),
    );
    let app = create_app(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "No file uploaded"})
    );
}

#[tokio::test]
async fn test_engine_failure_returns_500() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(
        Arc::new(FailingEngine {
            seen_path: Mutex::new(None),
        }),
        dir.path(),
        Duration::from_secs(60),
    );
    let app = create_app(state);

    let response = app
        .oneshot(multipart_request("image", b"garbage"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Failed to parse image text"})
    );
}

#[tokio::test]
async fn test_timeout_returns_500() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(
        Arc::new(SlowEngine),
        dir.path(),
        Duration::from_millis(50),
    );
    let app = create_app(state);

    let response = app
        .oneshot(multipart_request("image", b"bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Failed to parse image text"})
    );
}

#[tokio::test]
async fn test_temp_file_removed_after_success() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(FixedEngine::new(vec!["word"]));
    let state = test_state(engine.clone(), dir.path(), Duration::from_secs(60));
    let app = create_app(state);

    let response = app
        .oneshot(multipart_request("image", b"bytes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let seen = engine.seen_path.lock().unwrap().clone().unwrap();
    assert!(!seen.exists(), "temp file should be gone after the request");
    assert_eq!(dir_entry_count(dir.path()), 0);
}

#[tokio::test]
async fn test_temp_file_removed_after_failure() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(FailingEngine {
        seen_path: Mutex::new(None),
    });
    let state = test_state(engine.clone(), dir.path(), Duration::from_secs(60));
    let app = create_app(state);

    let response = app
        .oneshot(multipart_request("image", b"bytes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let seen = engine.seen_path.lock().unwrap().clone().unwrap();
    assert!(!seen.exists(), "temp file should be gone after a failure");
    assert_eq!(dir_entry_count(dir.path()), 0);
}

#[tokio::test]
async fn test_same_image_twice_yields_same_words() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(
        Arc::new(FixedEngine::new(vec!["same", "every", "time"])),
        dir.path(),
        Duration::from_secs(60),
    );

    let first = create_app(state.clone())
        .oneshot(multipart_request("image", b"identical bytes"))
        .await
        .unwrap();
    let second = create_app(state)
        .oneshot(multipart_request("image", b"identical bytes"))
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(first).await, body_json(second).await);
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(
        Arc::new(FixedEngine::new(vec![])),
        dir.path(),
        Duration::from_secs(60),
    );
    let app = create_app(state);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await;
    assert_eq!(payload["status"], "ok");
}
