use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState, HealthResponse};

/// GET /health
///
/// Unauthenticated liveness probe. Reports `degraded` when the database does
/// not answer.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = match state.store.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!("Health check database ping failed: {e}");
            "degraded"
        }
    };

    Json(HealthResponse {
        status,
        timestamp: chrono::Utc::now().to_rfc3339(),
        environment: state.environment.clone(),
    })
}

/// Any `/api` path without a route.
pub async fn api_not_found() -> ApiError {
    ApiError::NotFound("API endpoint not found".to_string())
}
