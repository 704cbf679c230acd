use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::{CompanyId, JobFilter, JobId, JobStatus, Priority};

/// Hours covered by the "recent jobs" view.
pub const RECENT_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub salary: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub matched_keywords: Vec<String>,
    pub date_found: DateTime<Utc>,
    pub applied_at: Option<DateTime<Utc>>,
    pub status: JobStatus,
    pub priority: Priority,
    pub company_id: CompanyId,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// A job counts as "searched" when at least one keyword matched it.
    #[must_use]
    pub fn is_searched(&self) -> bool {
        !self.matched_keywords.is_empty()
    }

    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.status == JobStatus::Applied
    }

    /// Strictly newer than `now - 24h`; a job found exactly at the boundary is not recent.
    #[must_use]
    pub fn is_recent(&self, now: DateTime<Utc>) -> bool {
        self.date_found > now - Duration::hours(RECENT_WINDOW_HOURS)
    }

    #[must_use]
    pub fn matches(&self, filter: JobFilter, now: DateTime<Utc>) -> bool {
        match filter {
            JobFilter::All => true,
            JobFilter::Searched => self.is_searched(),
            JobFilter::Applied => self.is_applied(),
            JobFilter::Recent => self.is_recent(now),
        }
    }
}

/// Insert payload for a job posting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub salary: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub matched_keywords: Vec<String>,
    pub date_found: DateTime<Utc>,
    pub status: JobStatus,
    pub priority: Priority,
    pub company_id: CompanyId,
    pub user_id: String,
}
