//! `SeaORM` implementation of the `CompanyService` trait.

use crate::db::Store;
use crate::domain::{CompanyId, CompanyStatus, Priority};
use crate::models::{Company, NewCompany};
use crate::services::company_service::{CompanyError, CompanyService, IngestReport, IngestRequest};
use crate::services::ingest::{self, PostingSink};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

pub struct SeaOrmCompanyService {
    store: Store,
    sink: Arc<dyn PostingSink>,
}

impl SeaOrmCompanyService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        let sink = Arc::new(store.clone());
        Self { store, sink }
    }

    /// Writes postings through `sink` instead of the store.
    #[must_use]
    pub fn with_sink(store: Store, sink: Arc<dyn PostingSink>) -> Self {
        Self { store, sink }
    }
}

#[async_trait]
impl CompanyService for SeaOrmCompanyService {
    async fn ingest(
        &self,
        owner_id: &str,
        request: IngestRequest,
    ) -> Result<IngestReport, CompanyError> {
        let url = request.url.trim();
        if url.is_empty() {
            return Err(CompanyError::Validation("Company URL is required".to_string()));
        }
        let url = url.to_string();

        let keywords = ingest::normalize_keywords(request.keywords);

        let new_company = NewCompany {
            name: ingest::extract_company_name(&url),
            career_page_url: ingest::career_page_url(&url, request.career_page_url.as_deref()),
            url,
            keywords: keywords.clone(),
            priority: request.priority,
            status: CompanyStatus::Active,
            check_interval_minutes: ingest::convert_interval_to_minutes(&request.check_interval),
            user_id: owner_id.to_string(),
        };

        let company = self.store.create_company(&new_company).await?;

        let drafts = ingest::synthesize_postings(&company, &keywords, Utc::now());
        let postings = ingest::persist_postings(self.sink.as_ref(), drafts).await;

        let report = IngestReport { company, postings };
        info!(
            company_id = %report.company.id,
            name = %report.company.name,
            jobs_found = report.jobs_found(),
            failed = report.failures().len(),
            "Company ingested"
        );

        Ok(report)
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<Company>, CompanyError> {
        Ok(self.store.list_companies(owner_id).await?)
    }

    async fn delete(&self, id: CompanyId, owner_id: &str) -> Result<(), CompanyError> {
        let jobs_removed = self.store.delete_jobs_for_company(id, owner_id).await?;
        let removed = self.store.delete_company(id, owner_id).await?;

        if removed {
            info!(company_id = %id, jobs_removed, "Company deleted");
        } else {
            debug!(company_id = %id, "Delete matched no company for this owner");
        }
        Ok(())
    }

    async fn update_priority(
        &self,
        id: CompanyId,
        owner_id: &str,
        priority: Priority,
    ) -> Result<(), CompanyError> {
        if !self.store.update_company_priority(id, owner_id, priority).await? {
            debug!(company_id = %id, "Priority update matched no company for this owner");
        }
        Ok(())
    }
}
