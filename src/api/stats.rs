use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::auth::AuthUser;
use super::{ApiError, AppState};
use crate::services::{Stats, StatsError};

impl From<StatsError> for ApiError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Database(msg) => Self::internal(msg),
        }
    }
}

/// GET /stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Stats>, ApiError> {
    let stats = state.stats_service.compute_stats(&user.id).await?;
    Ok(Json(stats))
}
