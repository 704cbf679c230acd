//! `SeaORM` implementation of the `JobService` trait.

use crate::db::Store;
use crate::domain::{JobFilter, JobId};
use crate::services::job_service::{JobError, JobListing, JobService};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, info};

pub struct SeaOrmJobService {
    store: Store,
}

impl SeaOrmJobService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JobService for SeaOrmJobService {
    async fn list(&self, owner_id: &str, filter: JobFilter) -> Result<Vec<JobListing>, JobError> {
        let (jobs, companies) = tokio::try_join!(
            self.store.list_jobs(owner_id),
            self.store.list_companies(owner_id)
        )?;

        let names: HashMap<_, _> = companies.into_iter().map(|c| (c.id, c.name)).collect();
        let now = Utc::now();

        Ok(jobs
            .into_iter()
            .filter(|job| job.matches(filter, now))
            .map(|job| JobListing {
                company_name: names.get(&job.company_id).cloned(),
                job,
            })
            .collect())
    }

    async fn delete(&self, id: JobId, owner_id: &str) -> Result<(), JobError> {
        if !self.store.delete_job(id, owner_id).await? {
            debug!(job_id = %id, "Delete matched no job for this owner");
        }
        Ok(())
    }

    async fn apply(&self, id: JobId, owner_id: &str) -> Result<(), JobError> {
        if self.store.mark_job_applied(id, owner_id, Utc::now()).await? {
            info!(job_id = %id, "Job marked as applied");
        } else {
            debug!(job_id = %id, "Apply matched no job for this owner");
        }
        Ok(())
    }
}
