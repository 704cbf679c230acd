//! Dashboard counters.
//!
//! Nothing here is stored; every request recomputes the projection from the
//! owner's companies and jobs.

use crate::models::{Company, Job};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for StatsError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub tracked_companies: usize,
    pub total_jobs: usize,
    pub searched_jobs: usize,
    pub applied_jobs: usize,
    pub recent_jobs: usize,
}

/// Reduces one owner's rows to the dashboard counters.
#[must_use]
pub fn compute(companies: &[Company], jobs: &[Job], now: DateTime<Utc>) -> Stats {
    Stats {
        tracked_companies: companies.len(),
        total_jobs: jobs.len(),
        searched_jobs: jobs.iter().filter(|j| j.is_searched()).count(),
        applied_jobs: jobs.iter().filter(|j| j.is_applied()).count(),
        recent_jobs: jobs.iter().filter(|j| j.is_recent(now)).count(),
    }
}

#[async_trait::async_trait]
pub trait StatsService: Send + Sync {
    async fn compute_stats(&self, owner_id: &str) -> Result<Stats, StatsError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompanyId, CompanyStatus, JobId, JobStatus, Priority};
    use chrono::{Duration, TimeZone};

    fn company(id: i32) -> Company {
        Company {
            id: CompanyId::new(id),
            name: "acme".to_string(),
            url: "https://acme.io".to_string(),
            career_page_url: "https://acme.io/careers".to_string(),
            keywords: vec![],
            priority: Priority::Medium,
            status: CompanyStatus::Active,
            check_interval_minutes: 1440,
            last_checked_at: None,
            user_id: "u1".to_string(),
            created_at: Utc::now(),
        }
    }

    fn job(id: i32, matched: &[&str], status: JobStatus, found: DateTime<Utc>) -> Job {
        Job {
            id: JobId::new(id),
            title: format!("Job {id}"),
            url: format!("https://acme.io/jobs/{id}"),
            description: None,
            salary: None,
            requirements: None,
            matched_keywords: matched.iter().map(|s| (*s).to_string()).collect(),
            date_found: found,
            applied_at: None,
            status,
            priority: Priority::Medium,
            company_id: CompanyId::new(1),
            user_id: "u1".to_string(),
            created_at: found,
        }
    }

    #[test]
    fn test_empty_projection() {
        assert_eq!(compute(&[], &[], Utc::now()), Stats::default());
    }

    #[test]
    fn test_counts() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let jobs = vec![
            job(1, &["react"], JobStatus::New, now - Duration::hours(1)),
            job(2, &[], JobStatus::Applied, now - Duration::days(3)),
            job(3, &["rust", "go"], JobStatus::Applied, now - Duration::days(2)),
            job(4, &[], JobStatus::Seen, now),
        ];

        let stats = compute(&[company(1), company(2)], &jobs, now);
        assert_eq!(
            stats,
            Stats {
                tracked_companies: 2,
                total_jobs: 4,
                searched_jobs: 2,
                applied_jobs: 2,
                recent_jobs: 2,
            }
        );
    }

    #[test]
    fn test_recent_window_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let jobs = vec![
            job(1, &[], JobStatus::New, now - Duration::hours(24) - Duration::seconds(1)),
            job(2, &[], JobStatus::New, now - Duration::hours(24)),
            job(3, &[], JobStatus::New, now - Duration::hours(23) - Duration::minutes(59)),
        ];

        assert_eq!(compute(&[], &jobs, now).recent_jobs, 1);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let json = serde_json::to_value(Stats::default()).unwrap();
        for key in [
            "trackedCompanies",
            "totalJobs",
            "searchedJobs",
            "appliedJobs",
            "recentJobs",
        ] {
            assert_eq!(json[key], 0, "missing {key}");
        }
    }
}
