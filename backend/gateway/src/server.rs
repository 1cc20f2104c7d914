//! Main HTTP server and router.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument};

use labelcheck_understanding::OcrProvider;

use crate::{health_api, verify_api};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub ocr: Arc<dyn OcrProvider>,
    /// Where uploads are staged while the OCR call runs.
    pub upload_dir: Arc<PathBuf>,
    pub max_upload_bytes: usize,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(ocr: Arc<dyn OcrProvider>, upload_dir: PathBuf, max_upload_bytes: usize) -> Self {
        Self {
            ocr,
            upload_dir: Arc::new(upload_dir),
            max_upload_bytes,
            started_at: Instant::now(),
        }
    }
}

/// Build the API router.
pub fn build_router(state: GatewayState) -> Router {
    let body_limit = state.max_upload_bytes;
    Router::new()
        .route("/api/verify", post(verify_api::verify_label))
        .route("/api/health", get(health_api::get_health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until the process exits.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    info!(
        provider = state.ocr.name(),
        upload_dir = %state.upload_dir.display(),
        "Label verification API listening on {}",
        addr
    );
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
