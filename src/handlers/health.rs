use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{info, warn};

use crate::models::HealthResponse;
use crate::services::intake;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let scratch_ready = intake::scratch_dir_ready(&state.config.upload_dir);
    let status = if scratch_ready { "healthy" } else { "degraded" };

    let response = HealthResponse {
        status: status.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ai_mode: state.config.ai.mode.label().to_string(),
        model: state.config.ai.model.clone(),
        max_file_size_mb: state.config.max_file_size_mb,
    };

    info!(
        status = status,
        ai_mode = %response.ai_mode,
        "Health check completed"
    );

    Json(response)
}

/// Readiness check endpoint
pub async fn ready_handler(State(state): State<AppState>) -> StatusCode {
    if intake::scratch_dir_ready(&state.config.upload_dir) {
        info!("Readiness check passed");
        StatusCode::OK
    } else {
        warn!(
            upload_dir = %state.config.upload_dir.display(),
            "Readiness check failed - scratch directory unavailable"
        );
        StatusCode::SERVICE_UNAVAILABLE
    }
}
