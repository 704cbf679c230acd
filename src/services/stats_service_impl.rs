//! `SeaORM` implementation of the `StatsService` trait.

use crate::db::Store;
use crate::services::stats_service::{Stats, StatsError, StatsService, compute};
use async_trait::async_trait;
use chrono::Utc;

pub struct SeaOrmStatsService {
    store: Store,
}

impl SeaOrmStatsService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StatsService for SeaOrmStatsService {
    async fn compute_stats(&self, owner_id: &str) -> Result<Stats, StatsError> {
        let (companies, jobs) = tokio::try_join!(
            self.store.list_companies(owner_id),
            self.store.list_jobs(owner_id)
        )?;

        Ok(compute(&companies, &jobs, Utc::now()))
    }
}
