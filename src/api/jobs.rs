use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::validation::parse_id;
use super::{ApiError, AppState, ListJobsQuery, SuccessResponse};
use crate::domain::JobId;
use crate::services::{JobError, JobListing};

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::Database(msg) => Self::internal(msg),
        }
    }
}

/// GET /jobs?filter=all|searched|applied|recent
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<ListJobsQuery>, QueryRejection>,
) -> Result<Json<Vec<JobListing>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::validation(e.body_text()))?;
    let jobs = state.job_service.list(&user.id, query.filter).await?;
    Ok(Json(jobs))
}

/// DELETE /jobs/{id}
pub async fn delete_job(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = JobId::new(parse_id(&id, "job")?);
    state.job_service.delete(id, &user.id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /jobs/{id}/apply
pub async fn apply_job(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = JobId::new(parse_id(&id, "job")?);
    state.job_service.apply(id, &user.id).await?;
    Ok(Json(SuccessResponse::ok()))
}
