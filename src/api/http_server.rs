use axum::{
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::upload::upload_handler;
use crate::config::ServerConfig;
use crate::ocr::OcrEngine;
use crate::storage::UploadStore;
use crate::version;

/// Shared request-handler state, constructed once at startup.
///
/// Holds the upload-directory store and the injected OCR engine; nothing in
/// here is mutated across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub engine: Arc<dyn OcrEngine>,
    pub store: Arc<UploadStore>,
}

impl AppState {
    pub fn new(config: ServerConfig, engine: Arc<dyn OcrEngine>, store: UploadStore) -> Self {
        Self {
            config: Arc::new(config),
            engine,
            store: Arc::new(store),
        }
    }

    /// State backed by a throwaway upload directory, for tests.
    pub fn new_for_test(engine: Arc<dyn OcrEngine>) -> Self {
        let dir = tempfile::tempdir()
            .expect("Failed to create test upload dir")
            .into_path();
        let store = UploadStore::new(dir).expect("Failed to create test upload store");
        Self::new(ServerConfig::default(), engine, store)
    }
}

/// Build the application router.
pub fn create_app(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Upload-and-recognize endpoint
        .route("/api/upload", post(upload_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and run the server until shutdown.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on port {}", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}

async fn health_handler() -> impl IntoResponse {
    axum::response::Json(json!({
        "status": "ok",
        "version": version::VERSION_NUMBER,
    }))
}
