use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub ocr_provider: String,
    pub uptime_seconds: u64,
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: "labelcheck",
        version: env!("CARGO_PKG_VERSION"),
        ocr_provider: state.ocr.name().to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
