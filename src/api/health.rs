//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub catalog: CatalogHealthResponse,
}

#[derive(Debug, Serialize)]
pub struct CatalogHealthResponse {
    pub templates: usize,
    pub limit: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_seconds = state.start_time.elapsed().as_secs();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        catalog: CatalogHealthResponse {
            templates: state.catalog.count(),
            limit: state.settings.catalog.max_templates,
        },
    })
}
