//! Domain service for tracked companies.
//!
//! Handles company ingestion (including placeholder posting synthesis), listing,
//! cascading deletion and priority changes. Every operation is scoped to the
//! owning user.

use crate::domain::{CompanyId, Priority};
use crate::models::{Company, Job};
use crate::services::ingest::{KeywordsInput, PostingOutcome, PostingResult};
use thiserror::Error;

/// Errors specific to company operations.
#[derive(Debug, Error)]
pub enum CompanyError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CompanyError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CompanyError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// A validated "add company" request.
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub url: String,
    pub keywords: KeywordsInput,
    pub priority: Priority,
    pub check_interval: String,
    pub career_page_url: Option<String>,
}

/// Result of an ingestion: the stored company and what happened to each posting
/// that survived the keyword filter.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub company: Company,
    pub postings: Vec<PostingResult>,
}

impl IngestReport {
    /// Number of postings that survived the keyword filter, persisted or not.
    #[must_use]
    pub fn jobs_found(&self) -> usize {
        self.postings.len()
    }

    #[must_use]
    pub fn persisted(&self) -> Vec<Job> {
        self.postings
            .iter()
            .filter_map(PostingResult::job)
            .cloned()
            .collect()
    }

    /// `(title, reason)` for every posting that could not be stored.
    #[must_use]
    pub fn failures(&self) -> Vec<(String, String)> {
        self.postings
            .iter()
            .filter_map(|result| match &result.outcome {
                PostingOutcome::Failed { reason } => {
                    Some((result.posting.title.clone(), reason.clone()))
                }
                PostingOutcome::Persisted { .. } => None,
            })
            .collect()
    }
}

/// Domain service trait for company management.
#[async_trait::async_trait]
pub trait CompanyService: Send + Sync {
    /// Stores a new company and synthesizes its postings.
    ///
    /// Posting inserts are best-effort: a failure is recorded in the report and
    /// does not fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyError::Database`] if the company itself cannot be stored.
    async fn ingest(&self, owner_id: &str, request: IngestRequest)
    -> Result<IngestReport, CompanyError>;

    /// Lists the owner's companies, oldest first.
    async fn list(&self, owner_id: &str) -> Result<Vec<Company>, CompanyError>;

    /// Deletes the company's jobs, then the company. Missing or foreign ids are a no-op.
    async fn delete(&self, id: CompanyId, owner_id: &str) -> Result<(), CompanyError>;

    /// Changes the company's priority. Missing or foreign ids are a no-op.
    async fn update_priority(
        &self,
        id: CompanyId,
        owner_id: &str,
        priority: Priority,
    ) -> Result<(), CompanyError>;
}
