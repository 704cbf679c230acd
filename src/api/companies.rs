use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::validation::{parse_id, parse_priority, validate_company_url};
use super::{
    ApiError, AppState, CreateCompanyRequest, FailedPosting, IngestResponse, SuccessResponse,
    UpdatePriorityRequest,
};
use crate::constants::ingest::DEFAULT_CHECK_INTERVAL_PHRASE;
use crate::domain::CompanyId;
use crate::models::Company;
use crate::services::{CompanyError, IngestRequest};

impl From<CompanyError> for ApiError {
    fn from(err: CompanyError) -> Self {
        match err {
            CompanyError::Validation(msg) => Self::validation(msg),
            CompanyError::Database(msg) => Self::internal(msg),
        }
    }
}

/// GET /companies
pub async fn list_companies(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let companies = state.company_service.list(&user.id).await?;
    Ok(Json(companies))
}

/// POST /companies
///
/// Stores the company and returns the postings synthesized for it.
pub async fn create_company(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateCompanyRequest>, JsonRejection>,
) -> Result<Json<IngestResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let request = IngestRequest {
        url: validate_company_url(payload.url.as_deref())?,
        keywords: payload.keywords.unwrap_or_default(),
        priority: parse_priority(payload.priority.as_deref())?,
        check_interval: payload
            .check_interval
            .unwrap_or_else(|| DEFAULT_CHECK_INTERVAL_PHRASE.to_string()),
        career_page_url: payload.career_page_url,
    };

    let report = state.company_service.ingest(&user.id, request).await?;

    Ok(Json(IngestResponse {
        success: true,
        jobs_found: report.jobs_found(),
        jobs: report.persisted(),
        failed_postings: report
            .failures()
            .into_iter()
            .map(|(title, reason)| FailedPosting { title, reason })
            .collect(),
        company: report.company,
    }))
}

/// DELETE /companies/{id}
pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = CompanyId::new(parse_id(&id, "company")?);
    state.company_service.delete(id, &user.id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// PUT /companies/{id}/priority
pub async fn update_priority(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePriorityRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = CompanyId::new(parse_id(&id, "company")?);
    let Json(payload) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let priority = payload
        .priority
        .as_deref()
        .ok_or_else(|| ApiError::validation("Priority is required"))
        .and_then(|p| parse_priority(Some(p)))?;

    state
        .company_service
        .update_priority(id, &user.id, priority)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
