//! Domain service for job postings.

use crate::domain::{JobFilter, JobId};
use crate::models::Job;
use serde::Serialize;
use thiserror::Error;

/// Errors specific to job operations.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for JobError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for JobError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// A job decorated with the name of the company it was found at.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    pub company_name: Option<String>,
}

/// Domain service trait for job postings.
#[async_trait::async_trait]
pub trait JobService: Send + Sync {
    /// Lists the owner's jobs matching `filter`, newest first.
    async fn list(&self, owner_id: &str, filter: JobFilter) -> Result<Vec<JobListing>, JobError>;

    /// Deletes a job. Missing or foreign ids are a no-op.
    async fn delete(&self, id: JobId, owner_id: &str) -> Result<(), JobError>;

    /// Marks a job as applied and stamps `appliedAt`, whatever its current status.
    async fn apply(&self, id: JobId, owner_id: &str) -> Result<(), JobError>;
}
