use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

/// Health check endpoint
///
/// Returns the health status of the API and its dependencies
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<Json<HealthResponse>> {
    let mut services = HashMap::new();

    // A lightweight store probe; the id is never written.
    match state.store.get("_health_check").await {
        Ok(_) => services.insert("store".to_string(), "connected".to_string()),
        Err(_) => services.insert("store".to_string(), "disconnected".to_string()),
    };

    services.insert("assistant".to_string(), "configured".to_string());

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
    }))
}
